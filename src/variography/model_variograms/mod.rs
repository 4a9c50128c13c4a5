pub mod exponential;
pub mod fitter;
pub mod gaussian;
pub mod spherical;
pub mod stable;

pub use exponential::Exponential;
pub use gaussian::Gaussian;
pub use spherical::Spherical;
pub use stable::Stable;

/// Parametric semivariogram families, addressable by the legacy numeric
/// codes 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Gaussian,
    Spherical,
    Exponential,
    Stable,
}

impl ModelKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ModelKind::Gaussian),
            2 => Some(ModelKind::Spherical),
            3 => Some(ModelKind::Exponential),
            4 => Some(ModelKind::Stable),
            _ => None,
        }
    }

    pub fn param_count(&self) -> usize {
        match self {
            ModelKind::Stable => 3,
            _ => 2,
        }
    }
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::Gaussian
    }
}

/// A fitted (or fittable) semivariogram model, evaluable at any lag `h >= 0`,
/// including lags beyond the fitted bin range.
#[derive(Debug, Clone, Copy)]
pub enum VariogramModel {
    Gaussian(Gaussian),
    Spherical(Spherical),
    Exponential(Exponential),
    Stable(Stable),
}

impl VariogramModel {
    /// Default-parameter model of the given family, ready for the fitter.
    pub fn with_kind(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Gaussian => VariogramModel::Gaussian(Gaussian::default()),
            ModelKind::Spherical => VariogramModel::Spherical(Spherical::default()),
            ModelKind::Exponential => VariogramModel::Exponential(Exponential::default()),
            ModelKind::Stable => VariogramModel::Stable(Stable::default()),
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            VariogramModel::Gaussian(_) => ModelKind::Gaussian,
            VariogramModel::Spherical(_) => ModelKind::Spherical,
            VariogramModel::Exponential(_) => ModelKind::Exponential,
            VariogramModel::Stable(_) => ModelKind::Stable,
        }
    }

    pub fn semivariance(&self, h: f64) -> f64 {
        match self {
            VariogramModel::Gaussian(v) => v.semivariance(h),
            VariogramModel::Spherical(v) => v.semivariance(h),
            VariogramModel::Exponential(v) => v.semivariance(h),
            VariogramModel::Stable(v) => v.semivariance(h),
        }
    }

    pub fn sill(&self) -> f64 {
        match self {
            VariogramModel::Gaussian(v) => v.sill,
            VariogramModel::Spherical(v) => v.sill,
            VariogramModel::Exponential(v) => v.sill,
            VariogramModel::Stable(v) => v.sill,
        }
    }

    pub fn range(&self) -> f64 {
        match self {
            VariogramModel::Gaussian(v) => v.range,
            VariogramModel::Spherical(v) => v.range,
            VariogramModel::Exponential(v) => v.range,
            VariogramModel::Stable(v) => v.range,
        }
    }

    /// Parameter layout is `[range, sill]`, plus `shape` for the stable model.
    pub fn set_params(&mut self, params: &[f64]) {
        match self {
            VariogramModel::Gaussian(v) => {
                v.range = params[0];
                v.sill = params[1];
            }
            VariogramModel::Spherical(v) => {
                v.range = params[0];
                v.sill = params[1];
            }
            VariogramModel::Exponential(v) => {
                v.range = params[0];
                v.sill = params[1];
            }
            VariogramModel::Stable(v) => {
                v.range = params[0];
                v.sill = params[1];
                v.shape = params[2];
            }
        }
    }

    pub fn evaluate_many(&self, lags: &[f64]) -> Vec<f64> {
        lags.iter().map(|h| self.semivariance(*h)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn all_models() -> Vec<VariogramModel> {
        vec![
            VariogramModel::Gaussian(Gaussian::new(2.0, 3.0)),
            VariogramModel::Spherical(Spherical::new(2.0, 3.0)),
            VariogramModel::Exponential(Exponential::new(2.0, 3.0)),
            VariogramModel::Stable(Stable::new(2.0, 3.0, 1.5)),
        ]
    }

    #[test]
    fn numeric_codes_map_to_model_kinds() {
        assert_eq!(ModelKind::from_code(1), Some(ModelKind::Gaussian));
        assert_eq!(ModelKind::from_code(2), Some(ModelKind::Spherical));
        assert_eq!(ModelKind::from_code(3), Some(ModelKind::Exponential));
        assert_eq!(ModelKind::from_code(4), Some(ModelKind::Stable));
        assert_eq!(ModelKind::from_code(5), None);
    }

    #[test]
    fn stable_carries_one_extra_parameter() {
        assert_eq!(ModelKind::Gaussian.param_count(), 2);
        assert_eq!(ModelKind::Spherical.param_count(), 2);
        assert_eq!(ModelKind::Exponential.param_count(), 2);
        assert_eq!(ModelKind::Stable.param_count(), 3);
    }

    #[test]
    fn semivariance_is_zero_at_origin() {
        for model in all_models() {
            assert_eq!(model.semivariance(0.0), 0.0, "{:?}", model.kind());
        }
    }

    #[test]
    fn semivariance_is_monotone_non_decreasing() {
        for model in all_models() {
            let mut prev = 0.0;
            let mut h = 0.0;
            while h <= 10.0 {
                let gamma = model.semivariance(h);
                assert!(
                    gamma >= prev - 1e-12,
                    "{:?} decreased at lag {h}: {gamma} < {prev}",
                    model.kind()
                );
                prev = gamma;
                h += 0.01;
            }
        }
    }

    #[test]
    fn semivariance_approaches_the_sill() {
        for model in all_models() {
            assert_relative_eq!(model.semivariance(1e4), 3.0, max_relative = 1e-6);
        }
    }

    #[test]
    fn zero_range_degenerates_to_sill_step() {
        let mut model = VariogramModel::with_kind(ModelKind::Gaussian);
        model.set_params(&[0.0, 2.0]);
        assert_eq!(model.semivariance(0.0), 0.0);
        assert_eq!(model.semivariance(0.5), 2.0);
    }
}
