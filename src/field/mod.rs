#[cfg(feature = "netcdf")]
pub mod netcdf;

/// Stub kept API-compatible with the real loader so callers can link against
/// `field::netcdf` unconditionally.
#[cfg(not(feature = "netcdf"))]
pub mod netcdf {
    use std::path::Path;

    use crate::error::DataAccessError;

    use super::GriddedField;

    /// Always fails with [`DataAccessError::NotAvailable`]; build with the
    /// `netcdf` feature to read NetCDF files.
    pub fn load_field(
        _path: impl AsRef<Path>,
        _field_var: &str,
        _lon_var: &str,
        _lat_var: &str,
    ) -> Result<GriddedField, DataAccessError> {
        Err(DataAccessError::NotAvailable)
    }
}

use itertools::izip;
use ndarray::{Array2, ArrayD, Axis, Ix1, Ix2};
use rand::Rng;

use crate::error::DataAccessError;

/// A 2D scalar field with co-located geographic coordinates.
///
/// Missing values are `f64::NAN`. The constructor performs no consistency
/// check between the value and coordinate grids; callers are responsible for
/// supplying fields expressed in the same coordinate system (here geographic
/// degrees) and matching shapes. A mismatch is not detected and silently
/// truncates the point cloud to the shortest array.
#[derive(Debug, Clone)]
pub struct GriddedField {
    pub values: Array2<f64>,
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
}

impl GriddedField {
    pub fn new(values: Array2<f64>, lon: Array2<f64>, lat: Array2<f64>) -> Self {
        Self { values, lon, lat }
    }

    /// Build a field from raw dynamic-dimensional arrays as read from a data
    /// source. Singleton axes are squeezed away; 1-D coordinate vectors are
    /// broadcast over the value grid (longitude along columns, latitude along
    /// rows).
    pub fn from_raw(
        values: ArrayD<f64>,
        lon: ArrayD<f64>,
        lat: ArrayD<f64>,
    ) -> Result<Self, DataAccessError> {
        let squeezed = squeeze(values);
        let shape = squeezed.shape().to_vec();
        let values = squeezed
            .into_dimensionality::<Ix2>()
            .map_err(|_| shape_error("field", &shape))?;
        let (rows, cols) = values.dim();

        let lon = coordinate_grid("lon", lon, rows, cols, BroadcastAxis::Columns)?;
        let lat = coordinate_grid("lat", lat, rows, cols, BroadcastAxis::Rows)?;

        Ok(Self { values, lon, lat })
    }

    /// Flatten into a NaN-filtered point cloud. Entries are dropped where the
    /// *value* is NaN; coordinates are removed pairwise.
    pub fn to_point_cloud(&self) -> PointCloud {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut values = Vec::new();
        for (lon, lat, v) in izip!(self.lon.iter(), self.lat.iter(), self.values.iter()) {
            if v.is_nan() {
                continue;
            }
            x.push(*lon);
            y.push(*lat);
            values.push(*v);
        }
        PointCloud { x, y, values }
    }
}

enum BroadcastAxis {
    Rows,
    Columns,
}

fn coordinate_grid(
    name: &str,
    raw: ArrayD<f64>,
    rows: usize,
    cols: usize,
    axis: BroadcastAxis,
) -> Result<Array2<f64>, DataAccessError> {
    let squeezed = squeeze(raw);
    match squeezed.ndim() {
        2 => {
            let shape = squeezed.shape().to_vec();
            squeezed
                .into_dimensionality::<Ix2>()
                .map_err(|_| shape_error(name, &shape))
        }
        1 => {
            let shape = squeezed.shape().to_vec();
            let vec = squeezed
                .into_dimensionality::<Ix1>()
                .map_err(|_| shape_error(name, &shape))?;
            match axis {
                BroadcastAxis::Columns if vec.len() == cols => {
                    Ok(Array2::from_shape_fn((rows, cols), |(_, j)| vec[j]))
                }
                BroadcastAxis::Rows if vec.len() == rows => {
                    Ok(Array2::from_shape_fn((rows, cols), |(i, _)| vec[i]))
                }
                _ => Err(shape_error(name, &shape)),
            }
        }
        _ => Err(shape_error(name, squeezed.shape())),
    }
}

fn shape_error(name: &str, shape: &[usize]) -> DataAccessError {
    DataAccessError::UnexpectedShape {
        name: name.to_string(),
        shape: shape.to_vec(),
    }
}

/// Remove all length-1 axes, keeping at least one dimension.
fn squeeze(mut a: ArrayD<f64>) -> ArrayD<f64> {
    while a.ndim() > 1 {
        match a.shape().iter().position(|&len| len == 1) {
            Some(axis) => a = a.index_axis_move(Axis(axis), 0),
            None => break,
        }
    }
    a
}

/// Flattened `(x, y, value)` triples for one semivariogram build.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub values: Vec<f64>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Draw `n` points uniformly **with replacement**; duplicated points are
    /// kept and contribute zero-distance pairs downstream.
    pub fn subsample_with_replacement<R: Rng>(&self, n: usize, rng: &mut R) -> PointCloud {
        if self.is_empty() {
            return PointCloud::default();
        }
        let mut out = PointCloud {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        };
        for _ in 0..n {
            let i = rng.gen_range(0..self.len());
            out.x.push(self.x[i]);
            out.y.push(self.y[i]);
            out.values.push(self.values[i]);
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{arr1, arr2, IxDyn};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn squeeze_removes_singleton_axes() {
        let a = ArrayD::from_shape_vec(IxDyn(&[1, 2, 1, 3]), (0..6).map(f64::from).collect())
            .unwrap();
        let s = squeeze(a);
        assert_eq!(s.shape(), &[2, 3]);
    }

    #[test]
    fn from_raw_broadcasts_1d_coordinates() {
        let values = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn();
        let lon = arr1(&[10.0, 11.0, 12.0]).into_dyn();
        let lat = arr1(&[40.0, 41.0]).into_dyn();

        let field = GriddedField::from_raw(values, lon, lat).unwrap();
        assert_eq!(field.lon[[1, 2]], 12.0);
        assert_eq!(field.lat[[1, 2]], 41.0);
    }

    #[test]
    fn from_raw_rejects_mismatched_1d_coordinate() {
        let values = arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn();
        let lon = arr1(&[10.0, 11.0, 12.0]).into_dyn();
        let lat = arr1(&[40.0, 41.0]).into_dyn();

        assert!(GriddedField::from_raw(values, lon, lat).is_err());
    }

    #[test]
    fn point_cloud_strips_nan_values_pairwise() {
        let values = arr2(&[[1.0, f64::NAN], [3.0, 4.0]]);
        let lon = arr2(&[[10.0, 11.0], [10.0, 11.0]]);
        let lat = arr2(&[[40.0, 40.0], [41.0, 41.0]]);

        let cloud = GriddedField::new(values, lon, lat).to_point_cloud();
        assert_eq!(cloud.len(), 3);
        assert!(cloud.values.iter().all(|v| !v.is_nan()));
        // the NaN entry sat at (11, 40); its coordinates must be gone too
        assert!(!cloud.x.iter().zip(cloud.y.iter()).any(|(x, y)| *x == 11.0 && *y == 40.0));
    }

    #[cfg(not(feature = "netcdf"))]
    #[test]
    fn netcdf_loader_reports_unavailable_without_the_feature() {
        let err = netcdf::load_field("anything.nc", "values", "lon", "lat").unwrap_err();
        assert!(matches!(err, DataAccessError::NotAvailable));
    }

    #[test]
    fn subsample_draws_exactly_n_points() {
        let cloud = PointCloud {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0, 2.0],
            values: vec![5.0, 6.0, 7.0],
        };
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = cloud.subsample_with_replacement(10, &mut rng);
        assert_eq!(sampled.len(), 10);
        assert!(sampled.values.iter().all(|v| cloud.values.contains(v)));
    }

    #[test]
    fn subsample_is_reproducible_with_seeded_rng() {
        let cloud = PointCloud {
            x: (0..50).map(f64::from).collect(),
            y: (0..50).map(f64::from).collect(),
            values: (0..50).map(f64::from).collect(),
        };
        let a = cloud.subsample_with_replacement(20, &mut StdRng::seed_from_u64(42));
        let b = cloud.subsample_with_replacement(20, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.values, b.values);
    }
}
