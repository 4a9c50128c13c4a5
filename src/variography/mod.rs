pub mod empirical;
pub mod model_variograms;

use rand::Rng;

use crate::error::{Error, Result};
use crate::field::PointCloud;
use empirical::EmpiricalSemivariogram;
use model_variograms::{fitter, ModelKind, VariogramModel};

/// Fewer valid points than this cannot support a meaningful semivariogram.
pub const MIN_POINTS: usize = 10;

/// An empirical semivariogram together with the model fit to it.
#[derive(Debug, Clone)]
pub struct SemivariogramResult {
    pub empirical: EmpiricalSemivariogram,
    pub model: VariogramModel,
}

/// Bin the point cloud into an empirical semivariogram and fit the requested
/// model family to it.
///
/// The RNG drives the fitter's multi-start initialization; pass a seeded
/// generator for reproducible fits.
pub fn fit_semivariogram<R: Rng>(
    cloud: &PointCloud,
    kind: ModelKind,
    max_lag: f64,
    bin_count: usize,
    rng: &mut R,
) -> Result<SemivariogramResult> {
    if cloud.len() < MIN_POINTS {
        return Err(Error::InsufficientData {
            valid: cloud.len(),
            required: MIN_POINTS,
        });
    }

    let empirical = EmpiricalSemivariogram::compute(cloud, max_lag, bin_count);
    let model = fitter::fit(&empirical, kind, rng)?;

    Ok(SemivariogramResult { empirical, model })
}
