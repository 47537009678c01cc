mod correlated;
mod kalbach;

pub use correlated::Law61Distribution;
pub use kalbach::Law44Distribution;

// Outgoing energy and scattering cosine sampled together, in the frame the
// data is tabulated in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyAngleSample {
    pub energy: f64,
    pub cos_theta: f64,
}
