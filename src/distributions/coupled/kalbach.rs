use rand::Rng;

use crate::distributions::{
    DistributionError, EnergyAngleSample, FrameOfReference, OutgoingEnergyTables, TabularInterpolation,
};
use crate::unitf64::UnitF64;

// Below this slope the Kalbach angular shape is flat
const ISOTROPIC_SLOPE: f64 = 1.0e-6;

//=====================================================================
// ACE law 44, Kalbach-Mann correlated energy-angle distribution
//
// Each outgoing energy point carries the precompound fraction R and the
// angular slope A. The cosine follows
//   p(mu) ~ A / (2 sinh A) [cosh(A mu) + R sinh(A mu)]
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct Law44Distribution {
    tables: OutgoingEnergyTables,
    precompound_fraction: Vec<Vec<f64>>,
    angular_slope: Vec<Vec<f64>>,
    frame: FrameOfReference,
    atomic_weight_ratio: f64,
}

impl Law44Distribution {
    pub fn new(
        tables: OutgoingEnergyTables,
        precompound_fraction: Vec<Vec<f64>>,
        angular_slope: Vec<Vec<f64>>,
        frame: FrameOfReference,
        atomic_weight_ratio: f64,
    ) -> Result<Self, DistributionError> {
        for (table, (r, a)) in tables.tables().iter().zip(precompound_fraction.iter().zip(angular_slope.iter())) {
            if r.len() != table.x().len() {
                return Err(DistributionError::LengthMismatch { what: "Kalbach precompound fractions", expected: table.x().len(), found: r.len() });
            }
            if a.len() != table.x().len() {
                return Err(DistributionError::LengthMismatch { what: "Kalbach angular slopes", expected: table.x().len(), found: a.len() });
            }
        }
        if precompound_fraction.len() != tables.tables().len() || angular_slope.len() != tables.tables().len() {
            return Err(DistributionError::LengthMismatch {
                what: "Kalbach parameter tables",
                expected: tables.tables().len(),
                found: precompound_fraction.len().min(angular_slope.len()),
            });
        }
        Ok(Self { tables, precompound_fraction, angular_slope, frame, atomic_weight_ratio })
    }

    pub fn tables(&self) -> &OutgoingEnergyTables {
        &self.tables
    }

    pub fn frame(&self) -> FrameOfReference {
        self.frame
    }

    pub fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    pub fn sample<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> EnergyAngleSample {
        let outgoing = self.tables.sample(energy, rng);
        let table = &self.tables.tables()[outgoing.table];
        let (r_values, a_values) = (&self.precompound_fraction[outgoing.table], &self.angular_slope[outgoing.table]);
        let k = outgoing.sample.bin;

        let (r, a) = match table.interpolation() {
            TabularInterpolation::LinLin if !table.is_discrete_bin(k) && k + 1 < table.x().len() => {
                let (x_k, x_k1) = (table.x()[k], table.x()[k + 1]);
                let fraction = if x_k1 > x_k { (outgoing.sample.value - x_k) / (x_k1 - x_k) } else { 0.0 };
                (
                    r_values[k] + fraction * (r_values[k + 1] - r_values[k]),
                    a_values[k] + fraction * (a_values[k + 1] - a_values[k]),
                )
            },
            _ => (r_values[k], a_values[k]),
        };

        let r3 = UnitF64::sample(rng).0;
        let r4 = UnitF64::sample(rng).0;
        let cos_theta = if a.abs() < ISOTROPIC_SLOPE {
            2.0 * r4 - 1.0
        } else if r3 > r {
            let t = (2.0 * r4 - 1.0) * a.sinh();
            (t + (t * t + 1.0).sqrt()).ln() / a
        } else {
            (r4 * a.exp() + (1.0 - r4) * (-a).exp()).ln() / a
        };

        EnergyAngleSample { energy: outgoing.energy.max(0.0), cos_theta: cos_theta.clamp(-1.0, 1.0) }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::distributions::TabularDistribution;
    use crate::utils::MockRng;

    fn single_table(slope: f64, fraction: f64) -> Law44Distribution {
        let table = TabularDistribution::new(
            TabularInterpolation::Histogram, 0, vec![0.0, 2.0], vec![0.5, 0.5], vec![0.0, 1.0],
        ).unwrap();
        Law44Distribution::new(
            OutgoingEnergyTables::new(vec![1.0], vec![table]).unwrap(),
            vec![vec![fraction, fraction]],
            vec![vec![slope, slope]],
            FrameOfReference::CenterOfMass,
            10.0,
        ).unwrap()
    }

    #[test]
    fn test_precompound_branch() {
        // xi3 <= R takes the exp(A mu) branch, xi4 = 0.5 with A = 1
        let dist = single_table(1.0, 1.0);
        let mut rng = MockRng::new(vec![0.5, 0.5, 0.5]);
        let sample = dist.sample(1.0, &mut rng);
        assert_abs_diff_eq!(sample.energy, 1.0);
        assert_abs_diff_eq!(sample.cos_theta, (0.5 * 1f64.exp() + 0.5 * (-1f64).exp()).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_compound_branch_is_symmetric() {
        // xi4 = 0.5 gives T = 0 and mu = 0
        let dist = single_table(2.0, 0.0);
        let mut rng = MockRng::new(vec![0.25, 0.5, 0.5]);
        let sample = dist.sample(1.0, &mut rng);
        assert_abs_diff_eq!(sample.energy, 0.5);
        assert_abs_diff_eq!(sample.cos_theta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_peaked() {
        let dist = single_table(5.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);
        let forward = (0..1000).filter(|_| dist.sample(1.0, &mut rng).cos_theta > 0.0).count();
        assert!(forward > 900, "forward fraction {forward}");
    }

    #[test]
    fn test_parameter_length_mismatch() {
        let table = TabularDistribution::new(
            TabularInterpolation::Histogram, 0, vec![0.0, 2.0], vec![0.5, 0.5], vec![0.0, 1.0],
        ).unwrap();
        let tables = OutgoingEnergyTables::new(vec![1.0], vec![table]).unwrap();
        assert!(Law44Distribution::new(tables, vec![vec![0.0]], vec![vec![0.0, 0.0]], FrameOfReference::CenterOfMass, 1.0).is_err());
    }
}
