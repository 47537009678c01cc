mod spectra;
mod tabular_laws;

use num_enum::TryFromPrimitive;
use rand::Rng;
use strum_macros::{Display, EnumIter};

use crate::distributions::SamplingError;

pub use spectra::{
    DiscretePhotonEnergyDistribution, EvaporationSpectrum, GeneralEvaporationSpectrum,
    LevelScatteringDistribution, MaxwellFissionSpectrum, WattSpectrum, MAX_REJECTION_ATTEMPTS,
};
pub use tabular_laws::{
    ContinuousTabularEnergyDistribution, EquiprobableBinsEnergyDistribution, OutgoingEnergySample,
    OutgoingEnergyTables,
};

// ACE energy distribution law tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Display, EnumIter)]
#[repr(i64)]
pub enum AceLaw {
    EquiprobableBins = 1,
    DiscretePhoton = 2,
    LevelScattering = 3,
    ContinuousTabular = 4,
    GeneralEvaporation = 5,
    MaxwellFission = 7,
    Evaporation = 9,
    Watt = 11,
    KalbachMann = 44,
    CorrelatedEnergyAngle = 61,
}

impl AceLaw {
    // Laws 44 and 61 carry their own angular distributions
    pub fn is_coupled(&self) -> bool {
        matches!(self, AceLaw::KalbachMann | AceLaw::CorrelatedEnergyAngle)
    }
}

// An outgoing energy distribution which is independent of the angle
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyDistribution {
    EquiprobableBins(EquiprobableBinsEnergyDistribution),
    DiscretePhoton(DiscretePhotonEnergyDistribution),
    LevelScattering(LevelScatteringDistribution),
    ContinuousTabular(ContinuousTabularEnergyDistribution),
    GeneralEvaporation(GeneralEvaporationSpectrum),
    MaxwellFission(MaxwellFissionSpectrum),
    Evaporation(EvaporationSpectrum),
    Watt(WattSpectrum),
}

impl EnergyDistribution {
    pub fn law(&self) -> AceLaw {
        match self {
            EnergyDistribution::EquiprobableBins(_) => AceLaw::EquiprobableBins,
            EnergyDistribution::DiscretePhoton(_) => AceLaw::DiscretePhoton,
            EnergyDistribution::LevelScattering(_) => AceLaw::LevelScattering,
            EnergyDistribution::ContinuousTabular(_) => AceLaw::ContinuousTabular,
            EnergyDistribution::GeneralEvaporation(_) => AceLaw::GeneralEvaporation,
            EnergyDistribution::MaxwellFission(_) => AceLaw::MaxwellFission,
            EnergyDistribution::Evaporation(_) => AceLaw::Evaporation,
            EnergyDistribution::Watt(_) => AceLaw::Watt,
        }
    }

    // Sample an outgoing energy for the given incident energy
    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        match self {
            EnergyDistribution::EquiprobableBins(dist) => Ok(dist.sample_energy(energy, rng)),
            EnergyDistribution::DiscretePhoton(dist) => Ok(dist.sample_energy(energy)),
            EnergyDistribution::LevelScattering(dist) => Ok(dist.sample_energy(energy)),
            EnergyDistribution::ContinuousTabular(dist) => dist.sample_energy(energy, rng),
            EnergyDistribution::GeneralEvaporation(dist) => dist.sample_energy(energy, rng),
            EnergyDistribution::MaxwellFission(dist) => dist.sample_energy(energy, rng),
            EnergyDistribution::Evaporation(dist) => dist.sample_energy(energy, rng),
            EnergyDistribution::Watt(dist) => dist.sample_energy(energy, rng),
        }
    }
}
