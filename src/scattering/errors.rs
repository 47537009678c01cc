use thiserror::Error;

use crate::distributions::{DistributionError, ParticlePair};
use crate::extractor::ExtractorError;

// Errors raised while classifying reactions and building their
// scattering distributions. Every data error names the table and the
// reaction (MT#) it was found in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScatteringError {
    #[error("Unknown angular distribution index ({value}) found in table {table} for MT = {mt}")]
    UnknownAngularLocator { table: String, mt: u32, value: i64 },
    #[error("Unsupported ENDF law number {law} found in ACE table {table} for MT# {mt}")]
    UnsupportedLaw { table: String, mt: u32, law: i64 },
    #[error("The coupled angle-energy distribution ACE law {law} was found in ACE table {table} for MT# {mt}, only laws 44 and 61 are supported")]
    UnsupportedCoupledLaw { table: String, mt: u32, law: i64 },
    #[error("MT# {mt} in ACE table {table} has multiple ENDF laws associated with it, which is not supported")]
    MultipleLaws { table: String, mt: u32 },
    #[error("MT# {mt} in ACE table {table} has {regions} interpolation regions in its ACE law {law} data, only a single region is supported")]
    MultipleInterpolationRegions { table: String, mt: u32, law: i64, regions: i64 },
    #[error("Unknown interpolation flag {flag} in table {table} for the energy distribution of MT = {mt}")]
    UnsupportedInterpolation { table: String, mt: u32, flag: i64 },
    #[error("MT# {mt} in ACE table {table} has discrete lines (INTT = {flag}) in coupled energy-angle data, which is not supported")]
    DiscreteLinesInCoupledData { table: String, mt: u32, flag: i64 },
    #[error("MT# {mt} in ACE table {table} uses ACE law 3, which must be in the CM system, but the lab system is specified")]
    Law3NotCenterOfMass { table: String, mt: u32 },
    #[error("Elastic scattering is not possible for the {pair} particle pair")]
    ElasticNotPossible { pair: ParticlePair },
    #[error("MT# {mt} in ACE table {table} has no scattering distribution")]
    NoScatteringDistribution { table: String, mt: u32 },
    #[error("Reaction classification of ACE table {table} is incomplete: {classified} reactions classified, {expected} expected")]
    IncompleteClassification { table: String, classified: usize, expected: usize },
    #[error("MT# {mt} in ACE table {table} has no energy distribution")]
    MissingEnergyDistribution { table: String, mt: u32 },
    #[error("Invalid multiplicity {value} in TYR of ACE table {table} for MT# {mt}, allowable values are 0, +/- 1-4, 19, and > 100")]
    InvalidMultiplicity { table: String, mt: u32, value: i64 },
    #[error("The incident energy grid of MT# {mt} in ACE table {table} is not sorted in ascending order")]
    UnsortedEnergyGrid { table: String, mt: u32 },
    #[error("Invalid distribution data for MT# {mt} in ACE table {table}: {source}")]
    InvalidDistribution { table: String, mt: u32, source: DistributionError },
    #[error(transparent)]
    Extraction(#[from] ExtractorError),
}

// Wrap a low level distribution error with the table and reaction it came from
pub(crate) fn invalid_distribution(table: &str, mt: u32) -> impl Fn(DistributionError) -> ScatteringError + '_ {
    move |source| ScatteringError::InvalidDistribution { table: table.to_string(), mt, source }
}
