mod helper_functions;
#[cfg(test)]
mod mock_rng;
#[cfg(test)]
pub mod testing;

pub use helper_functions::{compute_temperature_from_kT, read_lines, xss_count, xss_int};
#[cfg(test)]
pub use mock_rng::MockRng;
