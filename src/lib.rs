#![allow(non_snake_case, clippy::upper_case_acronyms)]

pub mod arrays;
pub mod distributions;
pub mod extractor;
pub mod header;
pub mod interpolation;
pub mod scattering;
pub mod table;
mod utils;

mod unitf64;

pub use extractor::{ExtractorError, XssBlockExtractor};
pub use scattering::{FactoryConfig, ScatteringBlocks, ScatteringDistributionFactory, ScatteringError};
pub use table::AceTable;
pub use unitf64::UnitF64;
