pub mod angular_factory;
mod array_size;
mod classification;
mod distribution_factory;
pub mod energy_factory;
mod errors;
mod record;

pub use array_size::calculate_dist_array_sizes;
pub use classification::{ReactionClassification, ReactionMultiplicity, RecordLocation, ELASTIC_MT};
pub use distribution_factory::{FactoryConfig, ScatteringBlocks, ScatteringDistributionFactory};
pub use errors::ScatteringError;
