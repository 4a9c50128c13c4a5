//! Plot-data artifacts. Chart rendering itself is left to external tooling;
//! this module writes the curve series it consumes as CSV under an injected
//! output directory.

use std::fs;
use std::path::{Path, PathBuf};

use csv::Writer;
use log::info;

use crate::error::Result;
use crate::estimator::ErrorCurve;
use crate::variography::SemivariogramResult;

/// Destination directory for analysis artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    dir: PathBuf,
}

impl ArtifactSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one semivariogram curve: empirical bins alongside the fitted
    /// model evaluated at the bin centers.
    pub fn write_semivariogram(
        &self,
        name: &str,
        result: &SemivariogramResult,
    ) -> Result<PathBuf> {
        let path = self.csv_path(name)?;
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(["lag", "pair_count", "empirical", "fitted"])?;

        let empirical = &result.empirical;
        for ((lag, gamma), count) in empirical
            .lags
            .iter()
            .zip(empirical.semivariance.iter())
            .zip(empirical.counts.iter())
        {
            writer.write_record([
                lag.to_string(),
                count.to_string(),
                gamma.to_string(),
                result.model.semivariance(*lag).to_string(),
            ])?;
        }
        writer.flush()?;

        info!("wrote semivariogram artifact {}", path.display());
        Ok(path)
    }

    /// Write the error curve with physical-unit axes: length scale in km and
    /// loss of spatial information in percent.
    pub fn write_error_curve(
        &self,
        name: &str,
        curve: &ErrorCurve,
        deg_to_km: f64,
    ) -> Result<PathBuf> {
        let path = self.csv_path(name)?;
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(["length_scale_km", "loss_percent"])?;

        for (lag, err) in curve.lags.iter().zip(curve.relative_error.iter()) {
            writer.write_record([
                (lag * deg_to_km).to_string(),
                (err * 100.0).to_string(),
            ])?;
        }
        writer.flush()?;

        info!("wrote error curve artifact {}", path.display());
        Ok(path)
    }

    fn csv_path(&self, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self.dir.join(format!("{name}.csv")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::PointCloud;
    use crate::variography::empirical::EmpiricalSemivariogram;
    use crate::variography::model_variograms::{Gaussian, VariogramModel};

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("repvar_export_{tag}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_semivariogram_csv() {
        let cloud = PointCloud {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 0.0, 0.0],
            values: vec![1.0, 2.0, 4.0],
        };
        let result = SemivariogramResult {
            empirical: EmpiricalSemivariogram::compute(&cloud, 5.0, 5),
            model: VariogramModel::Gaussian(Gaussian::new(1.0, 1.0)),
        };

        let dir = scratch_dir("semivariogram");
        let sink = ArtifactSink::new(&dir);
        let path = sink.write_semivariogram("semivariogram_slave", &result).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("lag,pair_count,empirical,fitted"));
        assert_eq!(contents.lines().count(), 6);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn error_curve_axes_are_scaled_to_physical_units() {
        let curve = ErrorCurve {
            lags: vec![1.0, 2.0],
            relative_error: vec![0.5, 0.75],
        };

        let dir = scratch_dir("error_curve");
        let sink = ArtifactSink::new(&dir);
        let path = sink
            .write_error_curve("spatial_representation_error", &curve, 110.0)
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("length_scale_km,loss_percent"));
        assert_eq!(lines.next(), Some("110,50"));
        assert_eq!(lines.next(), Some("220,75"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
