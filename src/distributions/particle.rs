use nalgebra::Vector3;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ParticleType {
    Neutron,
    Photon,
}

// Incident and outgoing particle of a set of scattering data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ParticlePair {
    NeutronNeutron,
    NeutronPhoton,
    PhotonNeutron,
}

impl ParticlePair {
    pub fn incident(&self) -> ParticleType {
        match self {
            ParticlePair::NeutronNeutron | ParticlePair::NeutronPhoton => ParticleType::Neutron,
            ParticlePair::PhotonNeutron => ParticleType::Photon,
        }
    }

    pub fn outgoing(&self) -> ParticleType {
        match self {
            ParticlePair::NeutronNeutron | ParticlePair::PhotonNeutron => ParticleType::Neutron,
            ParticlePair::NeutronPhoton => ParticleType::Photon,
        }
    }

    // Elastic scattering (MT 2) is not listed in MTR but has LAND/AND data
    pub fn is_elastic_implicit(&self) -> bool {
        matches!(self, ParticlePair::NeutronNeutron)
    }

    pub fn is_elastic_possible(&self) -> bool {
        self.incident() == self.outgoing()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub particle: ParticleType,
    pub energy: f64,
    pub direction: [f64; 3],
}

// Rotate a unit direction so the new one makes cos(theta) = mu with the old
// one, at azimuth phi around it
pub fn rotate_direction(direction: &[f64; 3], mu: f64, phi: f64) -> [f64; 3] {
    let old = Vector3::from(*direction);
    let sin_theta = (1.0 - mu * mu).max(0.0).sqrt();

    // Find a perpendicular vector to the old direction
    let perp = if old.x.abs() < 0.99 {
        Vector3::x().cross(&old).normalize()
    } else {
        Vector3::y().cross(&old).normalize()
    };
    let ortho = old.cross(&perp);

    let (sin_phi, cos_phi) = phi.sin_cos();
    let rotated = mu * old + sin_theta * cos_phi * perp + sin_theta * sin_phi * ortho;
    rotated.normalize().into()
}
