use crate::distributions::{DistributionError, SamplingError, TabularDistribution, TabularInterpolation};
use crate::interpolation::{InterpolationScheme, InterpolationTable};
use crate::unitf64::UnitF64;

// Trait to sample the cosine of the scattering angle from a given
// angular distribution provided with a random number from [0, 1].
// The caller is responsible for providing a random number in the range
// [0.0, 1.0]. This is checked in debug builds, but not in release builds.
pub trait SampleAngle {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, SamplingError>;
}

// The three kinds of angular distribution found in AND blocks
#[derive(Debug, Clone, PartialEq)]
pub enum AngularDistribution {
    Isotropic(IsotropicAngularDistribution),
    Tabulated(TabulatedAngularDistribution),
    EquiprobableBins(EquiprobableBinsAngularDistribution),
}

impl SampleAngle for AngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, SamplingError> {
        match self {
            AngularDistribution::Isotropic(distribution) => distribution.sample_cos_theta(unitf64),
            AngularDistribution::Tabulated(distribution) => distribution.sample_cos_theta(unitf64),
            AngularDistribution::EquiprobableBins(distribution) => distribution.sample_cos_theta(unitf64),
        }
    }
}

// Isotropic scattering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsotropicAngularDistribution;

impl SampleAngle for IsotropicAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, SamplingError> {
        Ok(2.0 * unitf64.0 - 1.0)
    }
}

// Tabulated PDF and CDF of the cosine, histogram or lin-lin
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedAngularDistribution ( pub TabularDistribution );

impl TabulatedAngularDistribution {
    pub fn new(
        interpolation_flag: i64,
        cos_theta: Vec<f64>,
        pdf: Vec<f64>,
        cdf: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        // Only histogram and linlin are allowed for tabulated angular distributions
        let interpolation = TabularInterpolation::from_flag(interpolation_flag, "tabulated angular distribution")?;
        if let Some(&value) = cos_theta.iter().find(|&&mu| !(-1.0..=1.0).contains(&mu)) {
            return Err(DistributionError::CosineOutOfRange { value });
        }
        Ok(Self(TabularDistribution::new(interpolation, 0, cos_theta, pdf, cdf)?))
    }
}

impl SampleAngle for TabulatedAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, SamplingError> {
        Ok(self.0.sample(unitf64.0).value)
    }
}

// Special ACE type, 32 equiprobable bins of cos theta
#[derive(Debug, Clone, PartialEq)]
pub struct EquiprobableBinsAngularDistribution ( pub InterpolationTable );

impl EquiprobableBinsAngularDistribution {
    pub fn new(cos_theta_bins: Vec<f64>) -> Result<Self, DistributionError> {
        const CAPACITY: usize = 33; // 32 bins + 1 for the last bin boundary
        // Exactly 33 points are required to define the 32 bins
        if cos_theta_bins.len() != CAPACITY {
            return Err(DistributionError::LengthMismatch {
                what: "equiprobable cos(theta) bin boundaries",
                expected: CAPACITY,
                found: cos_theta_bins.len(),
            });
        }

        // Ensure all cos_theta_bins are in the range [-1, 1]
        if let Some(&value) = cos_theta_bins.iter().find(|&&mu| !(-1.0..=1.0).contains(&mu)) {
            return Err(DistributionError::CosineOutOfRange { value });
        }
        if cos_theta_bins.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DistributionError::UnsortedGrid { what: "equiprobable cos(theta) bins" });
        }

        // Make the CDF for the bins
        let cos_theta_cdf: Vec<f64> = (0..CAPACITY).map(|i| i as f64 / (CAPACITY - 1) as f64).collect();

        // Because we are sampling from a CDF, the x values are the CDF values
        // and the y values are the cos(theta) values.
        let cos_theta_table =
            InterpolationTable::from_x_and_y(&cos_theta_cdf, &cos_theta_bins, InterpolationScheme::LinLin)?;
        Ok(Self(cos_theta_table))
    }
}

impl SampleAngle for EquiprobableBinsAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, SamplingError> {
        Ok(self.0.evaluate(unitf64.0)?)
    }
}
