mod angular;
mod coupled;
mod energy;
mod energy_dependent;
mod errors;
mod frame;
mod particle;
mod scattering_distribution;
mod tabular;

pub use angular::{
    AngularDistribution, EquiprobableBinsAngularDistribution, IsotropicAngularDistribution, SampleAngle,
    TabulatedAngularDistribution,
};
pub use coupled::{EnergyAngleSample, Law44Distribution, Law61Distribution};
pub use energy::{
    AceLaw, ContinuousTabularEnergyDistribution, DiscretePhotonEnergyDistribution, EnergyDistribution,
    EquiprobableBinsEnergyDistribution, EvaporationSpectrum, GeneralEvaporationSpectrum,
    LevelScatteringDistribution, MaxwellFissionSpectrum, OutgoingEnergySample, OutgoingEnergyTables,
    WattSpectrum, MAX_REJECTION_ATTEMPTS,
};
pub use energy_dependent::{EnergyDependentAngularDistribution, TwoTableSampling};
pub use errors::{DistributionError, SamplingError};
pub use frame::{center_of_mass_to_lab, elastic_center_of_mass_to_lab, FrameOfReference};
pub use particle::{rotate_direction, ParticlePair, ParticleState, ParticleType};
pub use scattering_distribution::ScatteringDistribution;
pub use tabular::{TabularDistribution, TabularInterpolation, TabularSample};
