use std::path::PathBuf;

use thiserror::Error;

use crate::variography::model_variograms::ModelKind;

pub type Result<T> = std::result::Result<T, crate::Error>;

/// Failure to open a gridded data source or pull a variable out of it.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("variable not found: {0}")]
    VariableNotFound(String),

    #[error("variable {name} has unexpected shape {shape:?}")]
    UnexpectedShape { name: String, shape: Vec<usize> },

    #[error("netcdf support not compiled in; enable the `netcdf` feature")]
    NotAvailable,

    #[error("backend: {0}")]
    Backend(String),
}

#[cfg(feature = "netcdf")]
impl From<netcdf::error::Error> for DataAccessError {
    fn from(e: netcdf::error::Error) -> Self {
        DataAccessError::Backend(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("data access: {0}")]
    DataAccess(#[from] DataAccessError),

    #[error("insufficient data: {valid} valid points, at least {required} required")]
    InsufficientData { valid: usize, required: usize },

    #[error("semivariogram fit did not converge for the {kind:?} model")]
    FitConvergence { kind: ModelKind },

    #[error("master semivariance {variance:e} at lag {lag} is below the variance floor")]
    DegenerateMasterVariance { lag: f64, variance: f64 },

    #[error("semivariogram models not fitted; call compute_semivariograms first")]
    ModelsNotFitted,

    #[error("artifact write failed: {0}")]
    Artifact(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
