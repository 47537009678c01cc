use crate::distributions::DistributionError;

//=====================================================================
// A tabulated probability density with its cumulative distribution,
// the building block of tabulated cosine distributions and of the
// continuous tabular energy laws (4, 44 and 61).
//
// The first `num_discrete` points are discrete lines, the rest is a
// continuous density interpolated with histogram or lin-lin.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularInterpolation {
    Histogram,
    LinLin,
}

impl TabularInterpolation {
    pub fn from_flag(flag: i64, what: &'static str) -> Result<Self, DistributionError> {
        match flag {
            1 => Ok(TabularInterpolation::Histogram),
            2 => Ok(TabularInterpolation::LinLin),
            _ => Err(DistributionError::UnsupportedInterpolation { what, flag }),
        }
    }
}

// Result of sampling a tabular distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabularSample {
    pub value: f64,
    // Index of the lower point of the bin the sample fell in
    pub bin: usize,
    // Position of the random number within the CDF of that bin, in [0, 1]
    pub cdf_fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabularDistribution {
    interpolation: TabularInterpolation,
    num_discrete: usize,
    x: Vec<f64>,
    pdf: Vec<f64>,
    cdf: Vec<f64>,
}

impl TabularDistribution {
    pub fn new(
        interpolation: TabularInterpolation,
        num_discrete: usize,
        x: Vec<f64>,
        pdf: Vec<f64>,
        cdf: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        if x.is_empty() {
            return Err(DistributionError::TooFewPoints { what: "tabular distribution", minimum: 1, found: 0 });
        }
        if pdf.len() != x.len() {
            return Err(DistributionError::LengthMismatch { what: "tabular PDF", expected: x.len(), found: pdf.len() });
        }
        if cdf.len() != x.len() {
            return Err(DistributionError::LengthMismatch { what: "tabular CDF", expected: x.len(), found: cdf.len() });
        }
        if num_discrete > x.len() {
            return Err(DistributionError::LengthMismatch { what: "tabular discrete lines", expected: x.len(), found: num_discrete });
        }
        // The continuous part needs at least a single bin
        if num_discrete < x.len() && x.len() - num_discrete < 2 {
            return Err(DistributionError::TooFewPoints { what: "continuous tabular distribution", minimum: 2, found: x.len() - num_discrete });
        }
        if x[num_discrete..].windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DistributionError::UnsortedGrid { what: "tabular distribution" });
        }
        if cdf.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DistributionError::UnsortedGrid { what: "tabular CDF" });
        }
        Ok(Self { interpolation, num_discrete, x, pdf, cdf })
    }

    pub fn interpolation(&self) -> TabularInterpolation {
        self.interpolation
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    pub fn num_discrete(&self) -> usize {
        self.num_discrete
    }

    // First and last points of the continuous part (or the only line)
    pub fn continuous_bounds(&self) -> (f64, f64) {
        let continuous = if self.num_discrete < self.x.len() { &self.x[self.num_discrete..] } else { &self.x[..] };
        (continuous[0], continuous[continuous.len() - 1])
    }

    pub fn is_discrete_bin(&self, bin: usize) -> bool {
        bin < self.num_discrete
    }

    // Invert the CDF for a random number in [0, 1]
    pub fn sample(&self, xi: f64) -> TabularSample {
        // Discrete lines come first, each owns the CDF up to its own entry
        for line in 0..self.num_discrete {
            if xi <= self.cdf[line] || line + 1 == self.x.len() {
                return TabularSample { value: self.x[line], bin: line, cdf_fraction: 0.0 };
            }
        }

        // Continuous part, find the bin with c[k] <= xi < c[k+1]
        let start = self.num_discrete;
        let last_bin = self.x.len() - 2;
        let cdf = &self.cdf[start..];
        let bin = (start + cdf.partition_point(|&c| c <= xi)).saturating_sub(1).clamp(start, last_bin);

        let (x_k, p_k, c_k) = (self.x[bin], self.pdf[bin], self.cdf[bin]);
        let (x_k1, p_k1, c_k1) = (self.x[bin + 1], self.pdf[bin + 1], self.cdf[bin + 1]);
        let cdf_fraction = if c_k1 > c_k { ((xi - c_k) / (c_k1 - c_k)).clamp(0.0, 1.0) } else { 0.0 };

        let value = match self.interpolation {
            TabularInterpolation::Histogram => {
                if p_k > 0.0 { x_k + (xi - c_k) / p_k } else { x_k }
            },
            TabularInterpolation::LinLin => {
                let slope = if x_k1 > x_k { (p_k1 - p_k) / (x_k1 - x_k) } else { 0.0 };
                if slope == 0.0 {
                    if p_k > 0.0 { x_k + (xi - c_k) / p_k } else { x_k }
                } else {
                    let discriminant = (p_k * p_k + 2.0 * slope * (xi - c_k)).max(0.0);
                    x_k + (discriminant.sqrt() - p_k) / slope
                }
            },
        };

        TabularSample { value: value.clamp(x_k, x_k1), bin, cdf_fraction }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_histogram_sampling() {
        let dist = TabularDistribution::new(
            TabularInterpolation::Histogram, 0,
            vec![0.0, 1.0, 3.0], vec![0.5, 0.25, 0.25], vec![0.0, 0.5, 1.0],
        ).unwrap();
        assert_abs_diff_eq!(dist.sample(0.0).value, 0.0);
        assert_abs_diff_eq!(dist.sample(0.25).value, 0.5);
        let sample = dist.sample(0.75);
        assert_abs_diff_eq!(sample.value, 2.0);
        assert_eq!(sample.bin, 1);
        assert_abs_diff_eq!(sample.cdf_fraction, 0.5);
        assert_abs_diff_eq!(dist.sample(1.0).value, 3.0);
    }

    #[test]
    fn test_linlin_sampling() {
        // Triangle on [0, 1] peaking at 0.5
        let dist = TabularDistribution::new(
            TabularInterpolation::LinLin, 0,
            vec![0.0, 0.5, 1.0], vec![0.0, 2.0, 0.0], vec![0.0, 0.5, 1.0],
        ).unwrap();
        assert_abs_diff_eq!(dist.sample(0.5).value, 0.5, epsilon = 1e-12);
        // CDF on the rising edge is 2x^2
        assert_abs_diff_eq!(dist.sample(0.125).value, 0.25, epsilon = 1e-12);
        // and 1 - 2(1-x)^2 on the falling edge
        assert_abs_diff_eq!(dist.sample(0.875).value, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_discrete_lines() {
        let dist = TabularDistribution::new(
            TabularInterpolation::Histogram, 2,
            vec![0.5, 1.5, 2.0, 3.0], vec![0.25, 0.25, 0.5, 0.5], vec![0.25, 0.5, 0.5, 1.0],
        ).unwrap();
        assert_eq!(dist.sample(0.1).value, 0.5);
        assert_eq!(dist.sample(0.4).value, 1.5);
        assert!(dist.is_discrete_bin(dist.sample(0.4).bin));
        assert_abs_diff_eq!(dist.sample(0.75).value, 2.5);
        assert_eq!(dist.continuous_bounds(), (2.0, 3.0));
    }

    #[test]
    fn test_single_delta() {
        let dist = TabularDistribution::new(
            TabularInterpolation::Histogram, 1, vec![2.2], vec![1.0], vec![1.0],
        ).unwrap();
        assert_eq!(dist.sample(0.9).value, 2.2);
        assert_eq!(dist.continuous_bounds(), (2.2, 2.2));
    }

    #[test]
    fn test_invalid_tables() {
        assert!(TabularDistribution::new(TabularInterpolation::LinLin, 0, vec![0.0], vec![1.0], vec![0.0]).is_err());
        assert!(TabularDistribution::new(TabularInterpolation::LinLin, 0, vec![0.0, 1.0], vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(TabularDistribution::new(TabularInterpolation::LinLin, 0, vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]).is_err());
        assert!(TabularInterpolation::from_flag(3, "test").is_err());
    }
}
