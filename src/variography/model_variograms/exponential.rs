/// Exponential semivariogram: `sill * (1 - exp(-h / range))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential {
    pub range: f64,
    pub sill: f64,
}

impl Exponential {
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
        self.sill * (1.0 - (-h / self.range).exp())
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
        let v = Exponential::new(2.0, 3.0);
        assert_relative_eq!(v.semivariance(2.0), 3.0 * (1.0 - (-1.0f64).exp()));
    }
}
