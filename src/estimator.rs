use log::info;
use rand::Rng;

use crate::error::{Error, Result};
use crate::export::ArtifactSink;
use crate::field::GriddedField;
use crate::variography::model_variograms::{ModelKind, VariogramModel};
use crate::variography::{fit_semivariogram, SemivariogramResult};

/// Kilometres per degree of great-circle distance, the default conversion
/// between physical length scales and the models' native lag unit.
pub const DEFAULT_DEG_TO_KM: f64 = 110.0;

/// Master semivariance below this is treated as degenerate; the relative
/// error is undefined there rather than infinite.
pub const VARIANCE_FLOOR: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub slave_model: ModelKind,
    pub master_model: ModelKind,
    /// Maximum lag distance in coordinate units (degrees).
    pub max_lag: f64,
    /// First lag of the error curve; near-zero lags are numerically fragile
    /// because both fitted variances vanish there.
    pub min_lag: f64,
    pub bin_count: usize,
    /// Lag increment of the error curve.
    pub curve_step: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            slave_model: ModelKind::Gaussian,
            master_model: ModelKind::Gaussian,
            max_lag: 5.0,
            min_lag: 0.25,
            bin_count: 100,
            curve_step: 0.1,
        }
    }
}

/// Fitted semivariograms for both analysis fields.
#[derive(Debug, Clone)]
pub struct FittedPair {
    pub slave: SemivariogramResult,
    pub master: SemivariogramResult,
}

/// Relative spatial-information loss per lag distance (native units).
#[derive(Debug, Clone)]
pub struct ErrorCurve {
    pub lags: Vec<f64>,
    pub relative_error: Vec<f64>,
}

/// Outcome of [`Analysis::estimate_error`].
#[derive(Debug, Clone)]
pub enum ErrorEstimate {
    /// Curve mode: one relative error per lag in `[min_lag, max_lag]`.
    Curve(ErrorCurve),
    /// Point mode: one relative error per queried length scale.
    Points(Vec<f64>),
}

/// One slave/master comparison session. Single-threaded and synchronous:
/// each step runs to completion before the next begins.
#[derive(Debug)]
pub struct Analysis {
    pub config: AnalysisConfig,
    slave: GriddedField,
    master: GriddedField,
    fitted: Option<FittedPair>,
    curve: Option<ErrorCurve>,
}

impl Analysis {
    pub fn new(slave: GriddedField, master: GriddedField, config: AnalysisConfig) -> Self {
        Self {
            config,
            slave,
            master,
            fitted: None,
            curve: None,
        }
    }

    /// Fitted models, once [`Self::compute_semivariograms`] has succeeded.
    pub fn fitted(&self) -> Option<&FittedPair> {
        self.fitted.as_ref()
    }

    /// Error curve retained by the last curve-mode estimation.
    pub fn error_curve(&self) -> Option<&ErrorCurve> {
        self.curve.as_ref()
    }

    /// Build and fit semivariograms for both fields. Either both fits land or
    /// the session stays unfitted; there is no partial success.
    ///
    /// `sample_size` subsamples each point cloud with replacement before
    /// binning; the RNG also seeds the fitter's multi-start search. With a
    /// sink, one curve artifact per field is written, named from `stem`
    /// (default `semivariogram`) with `_slave`/`_master` suffixes.
    pub fn compute_semivariograms<R: Rng>(
        &mut self,
        sample_size: Option<usize>,
        rng: &mut R,
        sink: Option<&ArtifactSink>,
        stem: Option<&str>,
    ) -> Result<&FittedPair> {
        info!("building and fitting the slave semivariogram");
        let slave = build_one(
            &self.slave,
            self.config.slave_model,
            &self.config,
            sample_size,
            rng,
        )?;

        info!("building and fitting the master semivariogram");
        let master = build_one(
            &self.master,
            self.config.master_model,
            &self.config,
            sample_size,
            rng,
        )?;

        if let Some(sink) = sink {
            let stem = stem.unwrap_or("semivariogram");
            sink.write_semivariogram(&format!("{stem}_slave"), &slave)?;
            sink.write_semivariogram(&format!("{stem}_master"), &master)?;
        }

        Ok(&*self.fitted.insert(FittedPair { slave, master }))
    }

    /// Estimate the spatial representation error from the fitted models.
    ///
    /// With `length_scale_km` the models are evaluated only at the queried
    /// physical scales (point mode); otherwise the full error curve over
    /// `[min_lag, max_lag]` is computed, retained as session state, and
    /// optionally written through the sink with physical-unit axes.
    ///
    /// Fails with [`Error::ModelsNotFitted`] before both models exist.
    pub fn estimate_error(
        &mut self,
        length_scale_km: Option<&[f64]>,
        deg_to_km: f64,
        sink: Option<&ArtifactSink>,
    ) -> Result<ErrorEstimate> {
        let pair = self.fitted.as_ref().ok_or(Error::ModelsNotFitted)?;
        let slave = &pair.slave.model;
        let master = &pair.master.model;

        match length_scale_km {
            Some(scales) => {
                let errors = error_at_scales(slave, master, scales, deg_to_km)?;
                Ok(ErrorEstimate::Points(errors))
            }
            None => {
                let curve = error_curve(
                    slave,
                    master,
                    self.config.min_lag,
                    self.config.max_lag,
                    self.config.curve_step,
                )?;
                if let Some(sink) = sink {
                    sink.write_error_curve("spatial_representation_error", &curve, deg_to_km)?;
                }
                self.curve = Some(curve.clone());
                Ok(ErrorEstimate::Curve(curve))
            }
        }
    }
}

fn build_one<R: Rng>(
    field: &GriddedField,
    kind: ModelKind,
    config: &AnalysisConfig,
    sample_size: Option<usize>,
    rng: &mut R,
) -> Result<SemivariogramResult> {
    let mut cloud = field.to_point_cloud();
    if let Some(n) = sample_size {
        cloud = cloud.subsample_with_replacement(n, rng);
    }
    fit_semivariogram(&cloud, kind, config.max_lag, config.bin_count, rng)
}

/// Relative spatial-information loss at one lag distance:
/// `1 - gamma_slave(h) / gamma_master(h)`.
pub fn relative_error(
    slave: &VariogramModel,
    master: &VariogramModel,
    lag: f64,
) -> Result<f64> {
    let var_master = master.semivariance(lag);
    if var_master.abs() < VARIANCE_FLOOR {
        return Err(Error::DegenerateMasterVariance {
            lag,
            variance: var_master,
        });
    }
    Ok(1.0 - slave.semivariance(lag) / var_master)
}

/// Evaluate the relative error over `[min_lag, max_lag]` at a fixed step,
/// inclusive of both endpoints.
pub fn error_curve(
    slave: &VariogramModel,
    master: &VariogramModel,
    min_lag: f64,
    max_lag: f64,
    step: f64,
) -> Result<ErrorCurve> {
    let n = ((max_lag - min_lag) / step + 1e-9).floor() as usize;
    let mut lags: Vec<f64> = (0..=n).map(|i| min_lag + i as f64 * step).collect();
    if max_lag - lags.last().copied().unwrap_or(min_lag) > 1e-9 {
        lags.push(max_lag);
    }

    let relative_error = lags
        .iter()
        .map(|h| relative_error(slave, master, *h))
        .collect::<Result<Vec<_>>>()?;

    Ok(ErrorCurve {
        lags,
        relative_error,
    })
}

/// Point mode: convert each physical length scale (km) to the models' native
/// lag unit and evaluate the relative error there.
pub fn error_at_scales(
    slave: &VariogramModel,
    master: &VariogramModel,
    scales_km: &[f64],
    deg_to_km: f64,
) -> Result<Vec<f64>> {
    scales_km
        .iter()
        .map(|scale| relative_error(slave, master, scale / deg_to_km))
        .collect()
}
