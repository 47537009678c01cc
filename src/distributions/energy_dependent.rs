use std::sync::Arc;

use lazy_static::lazy_static;
use rand::Rng;

use crate::distributions::{
    AngularDistribution, DistributionError, IsotropicAngularDistribution, SampleAngle, SamplingError,
};
use crate::unitf64::UnitF64;

// How to sample an angle at an incident energy which falls between two
// tabulated energies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TwoTableSampling {
    // Sample the upper table with probability equal to the relative
    // position of the energy in the bin, the lower one otherwise
    #[default]
    Independent,
    // Sample both tables with the same random number and interpolate
    // the two cosines
    Correlated,
}

lazy_static! {
    // Every isotropic reaction shares this one distribution
    static ref ISOTROPIC_DISTRIBUTION: Arc<EnergyDependentAngularDistribution> = Arc::new(
        EnergyDependentAngularDistribution {
            energy: vec![0.0],
            distributions: vec![AngularDistribution::Isotropic(IsotropicAngularDistribution)],
            sampling: TwoTableSampling::Independent,
        }
    );
}

// This struct contains all of the angular distributions for different energies for a reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDependentAngularDistribution {
    energy: Vec<f64>,
    distributions: Vec<AngularDistribution>,
    sampling: TwoTableSampling,
}

impl EnergyDependentAngularDistribution {
    pub fn new(
        energy: Vec<f64>,
        distributions: Vec<AngularDistribution>,
        sampling: TwoTableSampling,
    ) -> Result<Self, DistributionError> {
        if energy.is_empty() {
            return Err(DistributionError::TooFewPoints { what: "angular distribution energy grid", minimum: 1, found: 0 });
        }
        if energy.len() != distributions.len() {
            return Err(DistributionError::LengthMismatch {
                what: "angular distributions",
                expected: energy.len(),
                found: distributions.len(),
            });
        }
        if energy.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(DistributionError::UnsortedGrid { what: "angular distribution energy grid" });
        }
        Ok(Self { energy, distributions, sampling })
    }

    // The process wide isotropic distribution
    pub fn isotropic() -> Arc<Self> {
        Arc::clone(&ISOTROPIC_DISTRIBUTION)
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn distributions(&self) -> &[AngularDistribution] {
        &self.distributions
    }

    pub fn sampling(&self) -> TwoTableSampling {
        self.sampling
    }

    pub fn is_isotropic(&self) -> bool {
        self.distributions.iter().all(|dist| matches!(dist, AngularDistribution::Isotropic(_)))
    }

    pub fn sample_cos_theta_at_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        let last = self.energy.len() - 1;

        let mu = if energy <= self.energy[0] {
            // Below the grid, use the first table
            self.distributions[0].sample_cos_theta(UnitF64::sample(rng))?
        } else if energy >= self.energy[last] {
            // At or above the last energy, use the last table
            self.distributions[last].sample_cos_theta(UnitF64::sample(rng))?
        } else {
            // Find the bin with energy[lower] <= energy < energy[lower + 1]
            let lower = self.energy.partition_point(|&e| e <= energy) - 1;
            let upper = lower + 1;
            let factor = (energy - self.energy[lower]) / (self.energy[upper] - self.energy[lower]);

            match self.sampling {
                TwoTableSampling::Independent => {
                    let table = if UnitF64::sample(rng).0 < factor { upper } else { lower };
                    self.distributions[table].sample_cos_theta(UnitF64::sample(rng))?
                },
                TwoTableSampling::Correlated => {
                    // Sample from both distributions and interpolate the result
                    let unitf64 = UnitF64::sample(rng);
                    let lower_sample = self.distributions[lower].sample_cos_theta(unitf64)?;
                    let upper_sample = self.distributions[upper].sample_cos_theta(unitf64)?;
                    lower_sample + (upper_sample - lower_sample) * factor
                },
            }
        };

        // Roundoff can push us just outside of [-1, 1]
        Ok(mu.clamp(-1.0, 1.0))
    }
}

impl std::fmt::Display for EnergyDependentAngularDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnergyDependentAngularDistribution({} energies)", self.energy.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::distributions::{EquiprobableBinsAngularDistribution, TabulatedAngularDistribution};
    use crate::utils::MockRng;

    fn make_test_distribution(sampling: TwoTableSampling) -> EnergyDependentAngularDistribution {
        let energy = vec![1.0, 2.0, 3.0];
        let isotropic_distribution = AngularDistribution::Isotropic(IsotropicAngularDistribution);
        let tabulated_distribution = AngularDistribution::Tabulated(
            TabulatedAngularDistribution::new(1, vec![0.0, 0.5, 1.0], vec![1.0, 1.0, 1.0], vec![0.0, 0.5, 1.0]).unwrap()
        );
        let equiprobable_bins_distribution = AngularDistribution::EquiprobableBins(
            EquiprobableBinsAngularDistribution::new((0..33).map(|i| i as f64 / 32.0 - 1.0).collect()).unwrap()
        );
        let distributions = vec![isotropic_distribution, tabulated_distribution, equiprobable_bins_distribution];

        EnergyDependentAngularDistribution::new(energy, distributions, sampling).unwrap()
    }

    #[test]
    fn test_sample_cos_theta_on_bounds() {
        let distribution = make_test_distribution(TwoTableSampling::Independent);
        let mut rng = MockRng::new(vec![0.0, 0.5, 0.75]);
        // On the first energy, isotropic
        assert_eq!(distribution.sample_cos_theta_at_energy(1.0, &mut rng).unwrap(), -1.0);
        // On the last energy, equiprobable bins over [-1, 0]
        assert_eq!(distribution.sample_cos_theta_at_energy(3.0, &mut rng).unwrap(), -0.5);
        // Above the grid keeps using the last table
        assert_eq!(distribution.sample_cos_theta_at_energy(30.0, &mut rng).unwrap(), -0.25);
    }

    #[test]
    fn test_sample_cos_theta_below_grid() {
        let distribution = make_test_distribution(TwoTableSampling::Independent);
        let mut rng = MockRng::new(vec![0.75]);
        assert_eq!(distribution.sample_cos_theta_at_energy(0.1, &mut rng).unwrap(), 0.5);
    }

    #[test]
    fn test_independent_sampling() {
        let distribution = make_test_distribution(TwoTableSampling::Independent);
        // E = 1.75 is 75% of the way to the tabulated table
        let mut rng = MockRng::new(vec![0.5, 0.5, 0.875, 0.25]);
        // 0.5 < 0.75 selects the upper (tabulated) table
        assert_eq!(distribution.sample_cos_theta_at_energy(1.75, &mut rng).unwrap(), 0.5);
        // 0.875 > 0.75 selects the lower (isotropic) table
        assert_eq!(distribution.sample_cos_theta_at_energy(1.75, &mut rng).unwrap(), -0.5);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn test_correlated_sampling() {
        let distribution = make_test_distribution(TwoTableSampling::Correlated);
        let mut rng = MockRng::new(vec![0.0, 0.5]);
        // Interpolation between isotropic and tabulated, halfway
        assert_eq!(distribution.sample_cos_theta_at_energy(1.5, &mut rng).unwrap(), -0.5);
        assert_eq!(distribution.sample_cos_theta_at_energy(1.5, &mut rng).unwrap(), 0.25);
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn test_isotropic_singleton() {
        let first = EnergyDependentAngularDistribution::isotropic();
        let second = EnergyDependentAngularDistribution::isotropic();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_isotropic());
        let mut rng = MockRng::new(vec![0.25]);
        assert_eq!(first.sample_cos_theta_at_energy(14.0, &mut rng).unwrap(), -0.5);
    }

    #[test]
    fn test_invalid_grids() {
        let isotropic = AngularDistribution::Isotropic(IsotropicAngularDistribution);
        assert!(EnergyDependentAngularDistribution::new(vec![], vec![], TwoTableSampling::Independent).is_err());
        assert!(EnergyDependentAngularDistribution::new(
            vec![2.0, 1.0], vec![isotropic.clone(), isotropic.clone()], TwoTableSampling::Independent
        ).is_err());
        assert!(EnergyDependentAngularDistribution::new(
            vec![1.0, 2.0], vec![isotropic], TwoTableSampling::Independent
        ).is_err());
    }
}
