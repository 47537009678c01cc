use thiserror::Error;

use crate::interpolation::InterpolationError;

// Problems with the shape or contents of tabulated data, found while a
// distribution is being built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("{what}: expected {expected} values, found {found}")]
    LengthMismatch { what: &'static str, expected: usize, found: usize },
    #[error("{what} must contain at least {minimum} entries, found {found}")]
    TooFewPoints { what: &'static str, minimum: usize, found: usize },
    #[error("{what} is not sorted in ascending order")]
    UnsortedGrid { what: &'static str },
    #[error("Unsupported interpolation flag {flag} for {what}")]
    UnsupportedInterpolation { what: &'static str, flag: i64 },
    #[error("cos(theta) value {value} is out of range [-1, 1]")]
    CosineOutOfRange { value: f64 },
    #[error("{what} needs entries up to index {needed} but only {available} are available")]
    Truncated { what: &'static str, needed: usize, available: usize },
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

// Problems found while sampling from a built distribution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("Rejection sampling for {what} did not converge after {attempts} attempts")]
    RejectionLimit { what: &'static str, attempts: usize },
    #[error("Incident energy {energy} is not above the restriction energy {restriction} of the {what}")]
    BelowRestriction { what: &'static str, energy: f64, restriction: f64 },
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}
