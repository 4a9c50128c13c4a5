use itertools::izip;
use log::debug;
use ordered_float::OrderedFloat;
use rand::Rng;
use rmpfit::{MPConfig, MPFitter, MPPar, MPResult};

use crate::error::{Error, Result};
use crate::variography::empirical::EmpiricalSemivariogram;

use super::{ModelKind, VariogramModel};

/// Random restarts for the Levenberg-Marquardt fit; the empirical curve is
/// cheap to evaluate so a generous budget costs little.
const RESTARTS: usize = 100;

/// Lower bound for the stable model's shape exponent. Zero makes the model
/// constant and degenerate for the optimizer.
const SHAPE_MIN: f64 = 1e-2;
const SHAPE_MAX: f64 = 2.0;

struct VariogramFitter {
    lags: Vec<f64>,
    exp_var: Vec<f64>,
    model: VariogramModel,
    mppar_params: Vec<MPPar>,
}

impl VariogramFitter {
    fn new(lags: Vec<f64>, exp_var: Vec<f64>, kind: ModelKind) -> Self {
        let mut mppar_params: Vec<MPPar> = (0..kind.param_count())
            .map(|_| MPPar {
                limited_low: true,
                limit_low: 0.0,
                ..Default::default()
            })
            .collect();
        if kind == ModelKind::Stable {
            // the trailing shape exponent is bounded on both sides
            mppar_params[2] = MPPar {
                limited_low: true,
                limit_low: SHAPE_MIN,
                limited_up: true,
                limit_up: SHAPE_MAX,
                ..Default::default()
            };
        }

        Self {
            lags,
            exp_var,
            model: VariogramModel::with_kind(kind),
            mppar_params,
        }
    }
}

impl MPFitter for VariogramFitter {
    fn eval(&self, params: &[f64], deviates: &mut [f64]) -> MPResult<()> {
        let mut model = self.model;
        model.set_params(params);

        for (d, x, y) in izip!(deviates.iter_mut(), self.lags.iter(), self.exp_var.iter()) {
            *d = *y - model.semivariance(*x);
        }

        Ok(())
    }

    fn number_of_points(&self) -> usize {
        self.lags.len()
    }
}

/// Fit one model family to the populated bins of an empirical semivariogram
/// by bounded nonlinear least squares with multi-start random initialization.
pub fn fit<R: Rng>(
    empirical: &EmpiricalSemivariogram,
    kind: ModelKind,
    rng: &mut R,
) -> Result<VariogramModel> {
    let (lags, exp_var) = empirical.populated();
    if lags.is_empty() {
        return Err(Error::InsufficientData {
            valid: 0,
            required: 1,
        });
    }

    let max_sill = exp_var
        .iter()
        .cloned()
        .max_by_key(|v| OrderedFloat(*v))
        .unwrap_or(0.0);
    if !max_sill.is_finite() {
        return Err(Error::FitConvergence { kind });
    }

    // a flat-zero empirical curve (constant field) has no curvature for the
    // optimizer; the only consistent model is a zero-sill one
    if max_sill <= 0.0 {
        return Ok(zero_sill_model(kind, empirical.max_lag));
    }

    let max_range = lags
        .iter()
        .cloned()
        .max_by_key(|v| OrderedFloat(*v))
        .unwrap_or(empirical.max_lag);

    let fitter = VariogramFitter::new(lags, exp_var, kind);
    let config = MPConfig::default();
    let mut best: Option<(f64, Vec<f64>)> = None;

    for _ in 0..RESTARTS {
        let mut init = vec![
            rng.gen_range(0.0..max_range),
            rng.gen_range(0.0..max_sill),
        ];
        if kind == ModelKind::Stable {
            init.push(rng.gen_range(0.25..SHAPE_MAX));
        }

        let Ok(status) = fitter.mpfit(init.as_mut_slice(), Some(&fitter.mppar_params), &config)
        else {
            continue;
        };

        let err = status.resid.iter().map(|r| r * r).sum::<f64>();
        if !err.is_finite() {
            continue;
        }
        if best.as_ref().map_or(true, |(b, _)| err < *b) {
            best = Some((err, init));
        }
    }

    let (err, params) = best.ok_or(Error::FitConvergence { kind })?;
    debug!(
        "fitted {:?} model, params {:?}, squared residual {:.3e}",
        kind, params, err
    );

    let mut model = VariogramModel::with_kind(kind);
    model.set_params(&params);
    Ok(model)
}

fn zero_sill_model(kind: ModelKind, max_lag: f64) -> VariogramModel {
    let mut model = VariogramModel::with_kind(kind);
    match kind {
        ModelKind::Stable => model.set_params(&[max_lag, 0.0, 1.0]),
        _ => model.set_params(&[max_lag, 0.0]),
    }
    model
}
