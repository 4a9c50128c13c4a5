use crate::field::PointCloud;

/// Binned Matheron semivariance estimates over equal-width lag bins spanning
/// `[0, max_lag]`. Pairs separated by more than `max_lag` are discarded.
/// Immutable once computed.
#[derive(Debug, Clone)]
pub struct EmpiricalSemivariogram {
    /// Bin centers.
    pub lags: Vec<f64>,
    /// Half the mean squared value difference per bin; 0.0 for empty bins.
    pub semivariance: Vec<f64>,
    /// Number of point pairs per bin.
    pub counts: Vec<u64>,
    pub max_lag: f64,
}

impl EmpiricalSemivariogram {
    /// All-pairs binning. Quadratic in the point count; subsample the cloud
    /// first when it is large.
    pub fn compute(cloud: &PointCloud, max_lag: f64, bin_count: usize) -> Self {
        // zero bins leaves nothing to accumulate into; the empty result makes
        // any downstream fit fail with an insufficient-data error
        if bin_count == 0 {
            return Self {
                lags: Vec::new(),
                semivariance: Vec::new(),
                counts: Vec::new(),
                max_lag,
            };
        }

        let width = max_lag / bin_count as f64;
        let mut sums = vec![0f64; bin_count];
        let mut counts = vec![0u64; bin_count];

        let n = cloud.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = cloud.x[i] - cloud.x[j];
                let dy = cloud.y[i] - cloud.y[j];
                let dist = dx.hypot(dy);
                if dist > max_lag {
                    continue;
                }
                let mut bin = (dist / width) as usize;
                // a pair at exactly max_lag lands in the last bin
                if bin == bin_count {
                    bin -= 1;
                }
                let d = cloud.values[i] - cloud.values[j];
                sums[bin] += d * d;
                counts[bin] += 1;
            }
        }

        let lags = (0..bin_count).map(|i| (i as f64 + 0.5) * width).collect();
        let semivariance = sums
            .iter()
            .zip(counts.iter())
            .map(|(s, c)| if *c > 0 { 0.5 * s / *c as f64 } else { 0.0 })
            .collect();

        Self {
            lags,
            semivariance,
            counts,
            max_lag,
        }
    }

    /// Lag/semivariance pairs for bins that actually received point pairs;
    /// this is the fit target.
    pub fn populated(&self) -> (Vec<f64>, Vec<f64>) {
        let mut lags = Vec::new();
        let mut semivar = Vec::new();
        for ((lag, gamma), count) in self
            .lags
            .iter()
            .zip(self.semivariance.iter())
            .zip(self.counts.iter())
        {
            if *count > 0 {
                lags.push(*lag);
                semivar.push(*gamma);
            }
        }
        (lags, semivar)
    }
}
