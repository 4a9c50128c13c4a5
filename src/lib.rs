//! Spatial representation error estimation for gridded geophysical fields.
//!
//! Two fields enter an analysis: a coarse-resolution *slave* (the field under
//! evaluation, e.g. a satellite retrieval) and a finer-resolution *master*
//! (the reference). A parametric semivariogram model is fit to each field and
//! the fitted variance curves are compared across length scales, yielding the
//! fraction of spatial variance lost at the slave's resolution.

pub mod error;
pub mod estimator;
pub mod export;
pub mod field;
pub mod variography;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::error::{DataAccessError, Error, Result};
    pub use crate::estimator::{Analysis, AnalysisConfig, ErrorCurve, ErrorEstimate};
    pub use crate::export::ArtifactSink;
    pub use crate::field::{GriddedField, PointCloud};
    pub use crate::variography::model_variograms::{ModelKind, VariogramModel};
}
