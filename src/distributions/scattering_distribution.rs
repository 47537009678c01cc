use std::f64::consts::PI;
use std::sync::Arc;

use rand::Rng;

use crate::distributions::{
    center_of_mass_to_lab, elastic_center_of_mass_to_lab, rotate_direction, EnergyAngleSample,
    EnergyDependentAngularDistribution, EnergyDistribution, FrameOfReference, Law44Distribution,
    Law61Distribution, ParticleState, SamplingError,
};
use crate::unitf64::UnitF64;

//=====================================================================
// Everything needed to scatter a particle for a single reaction.
//
// Distributions are built once and shared, sampling never mutates them.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub enum ScatteringDistribution {
    // Energy and angle sampled independently of each other
    IndependentEnergyAngle {
        energy: Arc<EnergyDistribution>,
        angular: Arc<EnergyDependentAngularDistribution>,
        frame: FrameOfReference,
        atomic_weight_ratio: f64,
    },
    // Two body elastic scattering off a target at rest
    Elastic {
        angular: Arc<EnergyDependentAngularDistribution>,
        atomic_weight_ratio: f64,
    },
    Law44(Arc<Law44Distribution>),
    Law61(Arc<Law61Distribution>),
}

impl ScatteringDistribution {
    pub fn frame(&self) -> FrameOfReference {
        match self {
            ScatteringDistribution::IndependentEnergyAngle { frame, .. } => *frame,
            ScatteringDistribution::Elastic { .. } => FrameOfReference::CenterOfMass,
            ScatteringDistribution::Law44(dist) => dist.frame(),
            ScatteringDistribution::Law61(dist) => dist.frame(),
        }
    }

    pub fn atomic_weight_ratio(&self) -> f64 {
        match self {
            ScatteringDistribution::IndependentEnergyAngle { atomic_weight_ratio, .. }
            | ScatteringDistribution::Elastic { atomic_weight_ratio, .. } => *atomic_weight_ratio,
            ScatteringDistribution::Law44(dist) => dist.atomic_weight_ratio(),
            ScatteringDistribution::Law61(dist) => dist.atomic_weight_ratio(),
        }
    }

    // Sample the outgoing energy and cosine in the lab frame
    pub fn sample_lab<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<EnergyAngleSample, SamplingError> {
        let (native, frame) = match self {
            ScatteringDistribution::Elastic { angular, atomic_weight_ratio } => {
                let mu_cm = angular.sample_cos_theta_at_energy(energy, rng)?;
                let (energy_lab, mu_lab) = elastic_center_of_mass_to_lab(energy, mu_cm, *atomic_weight_ratio);
                return Ok(EnergyAngleSample { energy: energy_lab, cos_theta: mu_lab });
            },
            ScatteringDistribution::IndependentEnergyAngle { energy: energy_dist, angular, frame, .. } => {
                let outgoing = energy_dist.sample_energy(energy, rng)?;
                let cos_theta = angular.sample_cos_theta_at_energy(energy, rng)?;
                (EnergyAngleSample { energy: outgoing, cos_theta }, *frame)
            },
            ScatteringDistribution::Law44(dist) => (dist.sample(energy, rng), dist.frame()),
            ScatteringDistribution::Law61(dist) => (dist.sample(energy, rng)?, dist.frame()),
        };

        Ok(match frame {
            FrameOfReference::Laboratory => native,
            FrameOfReference::CenterOfMass => {
                let (energy_lab, mu_lab) = center_of_mass_to_lab(energy, native.energy, native.cos_theta, self.atomic_weight_ratio());
                EnergyAngleSample { energy: energy_lab, cos_theta: mu_lab }
            },
        })
    }

    // Scatter an incoming particle. Targets are treated as at rest, the
    // temperature is accepted for callers which carry it around.
    pub fn scatter_particle<R: Rng + ?Sized>(
        &self,
        incoming: &ParticleState,
        _temperature: f64,
        rng: &mut R,
    ) -> Result<ParticleState, SamplingError> {
        let sample = self.sample_lab(incoming.energy, rng)?;
        let phi = 2.0 * PI * UnitF64::sample(rng).0;
        Ok(ParticleState {
            particle: incoming.particle,
            energy: sample.energy,
            direction: rotate_direction(&incoming.direction, sample.cos_theta, phi),
        })
    }
}
