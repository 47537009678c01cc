use strum_macros::Display;

// Frame in which a reaction's outgoing energy and angle are tabulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FrameOfReference {
    CenterOfMass,
    Laboratory,
}

impl FrameOfReference {
    // TYR entries are negative for center of mass reactions
    pub fn from_center_of_mass_flag(is_center_of_mass: bool) -> Self {
        if is_center_of_mass { FrameOfReference::CenterOfMass } else { FrameOfReference::Laboratory }
    }

    pub fn is_center_of_mass(&self) -> bool {
        matches!(self, FrameOfReference::CenterOfMass)
    }
}

// Convert an outgoing energy and scattering cosine from the center of mass
// frame to the laboratory frame. Returns (E_lab, mu_lab).
pub fn center_of_mass_to_lab(incident_energy: f64, energy_cm: f64, mu_cm: f64, atomic_weight_ratio: f64) -> (f64, f64) {
    let a_plus_1 = atomic_weight_ratio + 1.0;
    let cross_term = (incident_energy * energy_cm).sqrt();
    let energy_lab = energy_cm + (incident_energy + 2.0 * mu_cm * a_plus_1 * cross_term) / (a_plus_1 * a_plus_1);
    if energy_lab <= 0.0 {
        return (0.0, mu_cm.clamp(-1.0, 1.0));
    }
    let mu_lab = mu_cm * (energy_cm / energy_lab).sqrt() + (incident_energy / energy_lab).sqrt() / a_plus_1;
    (energy_lab, mu_lab.clamp(-1.0, 1.0))
}

// Two body elastic kinematics off a target at rest. Returns (E_lab, mu_lab).
pub fn elastic_center_of_mass_to_lab(incident_energy: f64, mu_cm: f64, atomic_weight_ratio: f64) -> (f64, f64) {
    let a = atomic_weight_ratio;
    let denominator = a * a + 2.0 * a * mu_cm + 1.0;
    if denominator <= 0.0 {
        // Head on collision with an equal mass target, the neutron stops
        return (0.0, 0.0);
    }
    let energy_lab = incident_energy * denominator / ((a + 1.0) * (a + 1.0));
    let mu_lab = (1.0 + a * mu_cm) / denominator.sqrt();
    (energy_lab, mu_lab.clamp(-1.0, 1.0))
}
