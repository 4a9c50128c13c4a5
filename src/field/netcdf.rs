//! NetCDF field loader. Group-based files are not supported; variables are
//! addressed by plain name at the file root.

use std::path::Path;

use log::info;
use ndarray::{ArrayD, IxDyn};

use crate::error::DataAccessError;

use super::GriddedField;

/// Read a 2D field plus its longitude/latitude arrays from a NetCDF file.
///
/// No unit conversion, reprojection, or slave/master grid-alignment check is
/// performed here; both analysis inputs are assumed to be in geographic
/// degrees.
pub fn load_field(
    path: impl AsRef<Path>,
    field_var: &str,
    lon_var: &str,
    lat_var: &str,
) -> Result<GriddedField, DataAccessError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataAccessError::FileNotFound(path.to_path_buf()));
    }

    info!("reading gridded field {} from {}", field_var, path.display());
    let file = netcdf::open(path)?;

    let values = read_array(&file, field_var)?;
    let lon = read_array(&file, lon_var)?;
    let lat = read_array(&file, lat_var)?;

    GriddedField::from_raw(values, lon, lat)
}

fn read_array(file: &netcdf::File, name: &str) -> Result<ArrayD<f64>, DataAccessError> {
    let var = file
        .variable(name)
        .ok_or_else(|| DataAccessError::VariableNotFound(name.to_string()))?;

    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let data: Vec<f64> = var
        .values::<f64, _>(..)
        .map_err(|e| DataAccessError::Backend(e.to_string()))?;

    ArrayD::from_shape_vec(IxDyn(&dims), data)
        .map_err(|e| DataAccessError::Backend(e.to_string()))
}
