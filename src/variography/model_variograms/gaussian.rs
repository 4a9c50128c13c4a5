/// Gaussian semivariogram: `sill * (1 - exp(-(h / range)^2))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gaussian {
    pub range: f64,
    pub sill: f64,
}

impl Gaussian {
    pub fn new(range: f64, sill: f64) -> Self {
        Self { range, sill }
    }

    pub fn semivariance(&self, h: f64) -> f64 {
        if h <= 0.0 {
            return 0.0;
        }
        if self.range <= 0.0 {
            return self.sill;
        }
        self.sill * (1.0 - (-(h / self.range) * (h / self.range)).exp())
    }

    pub fn covariance(&self, h: f64) -> f64 {
        self.sill - self.semivariance(h)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_closed_form() {
        let v = Gaussian::new(2.0, 3.0);
        assert_relative_eq!(v.semivariance(1.0), 3.0 * (1.0 - (-0.25f64).exp()));
    }

    #[test]
    fn covariance_complements_semivariance() {
        let v = Gaussian::new(2.0, 3.0);
        assert_relative_eq!(v.covariance(1.5) + v.semivariance(1.5), 3.0);
    }
}
