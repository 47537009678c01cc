use std::f64::consts::PI;

use rand::Rng;

use crate::distributions::{DistributionError, SamplingError};
use crate::interpolation::InterpolationTable;
use crate::unitf64::UnitF64;

// Upper bound on rejection loops before sampling is reported as failed
pub const MAX_REJECTION_ATTEMPTS: usize = 10_000;

// Random number in (0, 1], safe to take the log of
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - UnitF64::sample(rng).0
}

// Sample the Maxwellian e' ~ sqrt(e') exp(-e'/T)
fn sample_maxwell<R: Rng + ?Sized>(temperature: f64, rng: &mut R) -> f64 {
    let r1 = open_unit(rng);
    let r2 = open_unit(rng);
    let c = (0.5 * PI * UnitF64::sample(rng).0).cos();
    -temperature * (r1.ln() + r2.ln() * c * c)
}

fn available_energy(what: &'static str, energy: f64, restriction: f64) -> Result<f64, SamplingError> {
    let available = energy - restriction;
    if available <= 0.0 {
        return Err(SamplingError::BelowRestriction { what, energy, restriction });
    }
    Ok(available)
}

//=====================================================================
// ACE law 2, discrete photon energy
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscretePhotonEnergyDistribution {
    // LP, 0 or 1 for a non-primary photon, 2 for a primary photon
    pub primary_flag: i64,
    pub photon_energy: f64,
    pub atomic_weight_ratio: f64,
}

impl DiscretePhotonEnergyDistribution {
    pub fn new(primary_flag: i64, photon_energy: f64, atomic_weight_ratio: f64) -> Result<Self, DistributionError> {
        match primary_flag {
            0..=2 => Ok(Self { primary_flag, photon_energy, atomic_weight_ratio }),
            flag => Err(DistributionError::UnsupportedInterpolation { what: "discrete photon primary flag", flag }),
        }
    }

    pub fn sample_energy(&self, energy: f64) -> f64 {
        if self.primary_flag == 2 {
            let a = self.atomic_weight_ratio;
            self.photon_energy + a / (a + 1.0) * energy
        } else {
            self.photon_energy
        }
    }
}

//=====================================================================
// ACE law 3, level scattering
//
// E' = LDAT(2) * (E - LDAT(1)) in the center of mass frame
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelScatteringDistribution {
    pub threshold: f64,
    pub mass_ratio: f64,
}

impl LevelScatteringDistribution {
    pub fn sample_energy(&self, energy: f64) -> f64 {
        (self.mass_ratio * (energy - self.threshold)).max(0.0)
    }
}

//=====================================================================
// ACE law 5, general evaporation spectrum
//
// E' = X(xi) * theta(E), X tabulated on equally probable points
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralEvaporationSpectrum {
    pub theta: InterpolationTable,
    pub x: Vec<f64>,
}

impl GeneralEvaporationSpectrum {
    pub fn new(theta: InterpolationTable, x: Vec<f64>) -> Result<Self, DistributionError> {
        if x.is_empty() {
            return Err(DistributionError::TooFewPoints { what: "general evaporation X", minimum: 1, found: 0 });
        }
        Ok(Self { theta, x })
    }

    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        let theta = self.theta.evaluate(energy)?;
        let x = if self.x.len() == 1 {
            self.x[0]
        } else {
            let num_bins = self.x.len() - 1;
            let position = UnitF64::sample(rng).0 * num_bins as f64;
            let bin = (position.floor() as usize).min(num_bins - 1);
            self.x[bin] + (position - bin as f64) * (self.x[bin + 1] - self.x[bin])
        };
        Ok(x * theta)
    }
}

//=====================================================================
// ACE law 7, simple Maxwell fission spectrum restricted to
// 0 <= E' <= E - U
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct MaxwellFissionSpectrum {
    pub theta: InterpolationTable,
    pub restriction_energy: f64,
}

impl MaxwellFissionSpectrum {
    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        let available = available_energy("Maxwell fission spectrum", energy, self.restriction_energy)?;
        let theta = self.theta.evaluate(energy)?;
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let sampled = sample_maxwell(theta, rng);
            if sampled <= available {
                return Ok(sampled);
            }
        }
        Err(SamplingError::RejectionLimit { what: "Maxwell fission spectrum", attempts: MAX_REJECTION_ATTEMPTS })
    }
}

//=====================================================================
// ACE law 9, evaporation spectrum restricted to 0 <= E' <= E - U
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct EvaporationSpectrum {
    pub theta: InterpolationTable,
    pub restriction_energy: f64,
}

impl EvaporationSpectrum {
    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        let available = available_energy("evaporation spectrum", energy, self.restriction_energy)?;
        let theta = self.theta.evaluate(energy)?;
        let y = available / theta;
        let v = 1.0 - (-y).exp();
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let r1 = UnitF64::sample(rng).0;
            let r2 = UnitF64::sample(rng).0;
            let x = -((1.0 - v * r1) * (1.0 - v * r2)).ln();
            if x <= y {
                return Ok(x * theta);
            }
        }
        Err(SamplingError::RejectionLimit { what: "evaporation spectrum", attempts: MAX_REJECTION_ATTEMPTS })
    }
}

//=====================================================================
// ACE law 11, energy dependent Watt spectrum restricted to
// 0 <= E' <= E - U
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct WattSpectrum {
    pub a: InterpolationTable,
    pub b: InterpolationTable,
    pub restriction_energy: f64,
}

impl WattSpectrum {
    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        let available = available_energy("Watt spectrum", energy, self.restriction_energy)?;
        let a = self.a.evaluate(energy)?;
        let b = self.b.evaluate(energy)?;
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let w = sample_maxwell(a, rng);
            let sampled = w + 0.25 * a * a * b + (2.0 * UnitF64::sample(rng).0 - 1.0) * (a * a * b * w).sqrt();
            if sampled <= available {
                return Ok(sampled);
            }
        }
        Err(SamplingError::RejectionLimit { what: "Watt spectrum", attempts: MAX_REJECTION_ATTEMPTS })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::interpolation::InterpolationScheme;
    use crate::utils::MockRng;

    fn constant(value: f64) -> InterpolationTable {
        InterpolationTable::from_x_and_y(&[1e-11, 20.0], &[value, value], InterpolationScheme::LinLin).unwrap()
    }

    #[test]
    fn test_discrete_photon() {
        let non_primary = DiscretePhotonEnergyDistribution::new(0, 2.2, 10.0).unwrap();
        assert_eq!(non_primary.sample_energy(14.0), 2.2);
        let primary = DiscretePhotonEnergyDistribution::new(2, 2.2, 10.0).unwrap();
        assert_abs_diff_eq!(primary.sample_energy(11.0), 12.2, epsilon = 1e-12);
        assert!(DiscretePhotonEnergyDistribution::new(3, 2.2, 10.0).is_err());
    }

    #[test]
    fn test_level_scattering() {
        let level = LevelScatteringDistribution { threshold: 0.55, mass_ratio: (10.0f64 / 11.0).powi(2) };
        assert_abs_diff_eq!(level.sample_energy(1.76), 1.21 * (10.0f64 / 11.0).powi(2), epsilon = 1e-12);
        assert_eq!(level.sample_energy(0.1), 0.0);
    }

    #[test]
    fn test_general_evaporation() {
        let spectrum = GeneralEvaporationSpectrum::new(constant(2.0), vec![0.0, 1.0, 3.0]).unwrap();
        // xi = 0.75 sits halfway into the second X bin
        let mut rng = MockRng::new(vec![0.75]);
        assert_abs_diff_eq!(spectrum.sample_energy(5.0, &mut rng).unwrap(), 4.0);
    }

    #[test]
    fn test_maxwell_formula() {
        let spectrum = MaxwellFissionSpectrum { theta: constant(1.0), restriction_energy: -20.0 };
        // r1 = r2 = 1 - 0.5, cos(pi/4)^2 = 0.5
        let mut rng = MockRng::new(vec![0.5, 0.5, 0.5]);
        let expected = -(0.5f64.ln() + 0.5 * 0.5f64.ln());
        assert_abs_diff_eq!(spectrum.sample_energy(1.0, &mut rng).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_restricted_spectra_stay_below_limit() {
        let mut rng = StdRng::seed_from_u64(42);
        let maxwell = MaxwellFissionSpectrum { theta: constant(1.3), restriction_energy: 1.0 };
        let evaporation = EvaporationSpectrum { theta: constant(0.8), restriction_energy: 1.0 };
        let watt = WattSpectrum { a: constant(0.988), b: constant(2.249), restriction_energy: 1.0 };
        for _ in 0..1000 {
            for sampled in [
                maxwell.sample_energy(3.0, &mut rng).unwrap(),
                evaporation.sample_energy(3.0, &mut rng).unwrap(),
                watt.sample_energy(3.0, &mut rng).unwrap(),
            ] {
                assert!((0.0..=2.0).contains(&sampled), "sampled {sampled}");
            }
        }
    }

    #[test]
    fn test_watt_mean_energy() {
        // Unrestricted Watt mean is 3a/2 + a^2 b/4
        let (a, b) = (0.988, 2.249);
        let watt = WattSpectrum { a: constant(a), b: constant(b), restriction_energy: -1000.0 };
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean = (0..n).map(|_| watt.sample_energy(1.0, &mut rng).unwrap()).sum::<f64>() / n as f64;
        assert_abs_diff_eq!(mean, 1.5 * a + 0.25 * a * a * b, epsilon = 0.05);
    }

    #[test]
    fn test_below_restriction() {
        let mut rng = MockRng::new(vec![]);
        let evaporation = EvaporationSpectrum { theta: constant(0.8), restriction_energy: 2.0 };
        assert_eq!(
            evaporation.sample_energy(1.5, &mut rng),
            Err(SamplingError::BelowRestriction { what: "evaporation spectrum", energy: 1.5, restriction: 2.0 })
        );
    }
}
