/// Stable (generalized exponential) semivariogram:
/// `sill * (1 - exp(-(h / range)^shape))` with `0 < shape <= 2`.
///
/// `shape = 1` reduces to the exponential family, `shape = 2` to the
/// Gaussian.
#[derive(Debug, Clone, Copy)]
pub struct Stable {
    pub range: f64,
    pub sill: f64,
    pub shape: f64,
}

impl Stable {
    pub fn new(range: f64, sill: f64, shape: f64) -> Self {
        Self { range, sill, shape }
    }

    pub fn semivariance(&self, h: f64) -> f64 {
        if h <= 0.0 {
            return 0.0;
        }
        if self.range <= 0.0 {
            return self.sill;
        }
        self.sill * (1.0 - (-(h / self.range).powf(self.shape)).exp())
    }

    pub fn covariance(&self, h: f64) -> f64 {
        self.sill - self.semivariance(h)
    }
}

impl Default for Stable {
    fn default() -> Self {
        Self {
            range: 0.0,
            sill: 0.0,
            shape: 1.0,
        }
    }
}
