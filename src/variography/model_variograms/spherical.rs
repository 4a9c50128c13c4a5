/// Spherical semivariogram: cubic ramp to the sill at `range`, constant
/// beyond.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spherical {
    pub range: f64,
    pub sill: f64,
}

impl Spherical {
    pub fn new(range: f64, sill: f64) -> Self {
        Self { range, sill }
    }

    pub fn semivariance(&self, h: f64) -> f64 {
        if h <= 0.0 {
            return 0.0;
        }
        if h >= self.range || self.range <= 0.0 {
            return self.sill;
        }
        let r = h / self.range;
        self.sill * (1.5 * r - 0.5 * r * r * r)
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
    fn ramps_to_the_sill_at_range() {
        let v = Spherical::new(2.0, 4.0);
        assert_relative_eq!(v.semivariance(1.0), 4.0 * (0.75 - 0.0625));
        assert_relative_eq!(v.semivariance(2.0), 4.0);
        assert_relative_eq!(v.semivariance(10.0), 4.0);
    }
}
