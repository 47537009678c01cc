use std::collections::{HashMap, HashSet};

use crate::distributions::FrameOfReference;
use crate::scattering::{calculate_dist_array_sizes, ScatteringError};
use crate::utils::xss_int;

// MT number of elastic scattering
pub const ELASTIC_MT: u32 = 2;

//=====================================================================
// Number of particles released by a reaction, decoded from |TYR|
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionMultiplicity {
    Discrete(usize),
    EnergyDependent,
}

impl ReactionMultiplicity {
    // 1-4 particles, or an energy dependent yield (19, > 100). Zero (no
    // release) and anything else is rejected.
    pub fn from_tyr(value: i64) -> Option<Self> {
        match value.abs() {
            n @ 1..=4 => Some(ReactionMultiplicity::Discrete(n as usize)),
            n if n == 19 || n > 100 => Some(ReactionMultiplicity::EnergyDependent),
            _ => None,
        }
    }
}

// Where a reaction's record sits in its data block, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLocation {
    pub start: usize,
    pub size: usize,
}

//=====================================================================
// Sorts the reactions of a table by how their scattering distributions
// are stored, using MTR/TYR together with the LAND/AND and LDLW/DLW
// locator and data blocks.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionClassification {
    ordering: HashMap<u32, usize>,
    cm_scattering: HashMap<u32, bool>,
    multiplicity: HashMap<u32, ReactionMultiplicity>,
    angular: HashMap<u32, RecordLocation>,
    isotropic: HashSet<u32>,
    coupled: HashSet<u32>,
    energy: HashMap<u32, RecordLocation>,
}

impl ReactionClassification {
    // Without a TYR block every reaction releases one particle in the lab
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        table: &str,
        mtr: &[f64],
        tyr: Option<&[f64]>,
        land: &[f64],
        and: &[f64],
        ldlw: &[f64],
        dlw: &[f64],
        elastic_implicit: bool,
    ) -> Result<Self, ScatteringError> {
        let dummy_tyr;
        let tyr = match tyr {
            Some(tyr) => tyr,
            None => {
                dummy_tyr = vec![1.0; mtr.len()];
                &dummy_tyr
            },
        };

        let mut classification = Self {
            ordering: HashMap::new(),
            cm_scattering: HashMap::new(),
            multiplicity: HashMap::new(),
            angular: HashMap::new(),
            isotropic: HashSet::new(),
            coupled: HashSet::new(),
            energy: HashMap::new(),
        };
        // Reactions in MTR order, so errors are reported deterministically
        let mut ordered = Vec::new();

        // Ordering, frame of reference and multiplicity from MTR/TYR
        for (index, (&mt, &release)) in mtr.iter().zip(tyr.iter()).enumerate() {
            let (mt, release) = (xss_int(mt) as u32, xss_int(release));
            if release == 0 {
                continue;
            }
            let multiplicity = ReactionMultiplicity::from_tyr(release)
                .ok_or_else(|| ScatteringError::InvalidMultiplicity { table: table.to_string(), mt, value: release })?;
            classification.ordering.insert(mt, index);
            classification.cm_scattering.insert(mt, release < 0);
            classification.multiplicity.insert(mt, multiplicity);
            ordered.push((mt, index));
        }
        if elastic_implicit {
            classification.cm_scattering.insert(ELASTIC_MT, true);
        }

        classification.classify_angular(table, land, and, &ordered, elastic_implicit)?;
        classification.locate_energy(table, ldlw, dlw, &ordered)?;

        Ok(classification)
    }

    fn classify_angular(
        &mut self,
        table: &str,
        land: &[f64],
        and: &[f64],
        ordered: &[(u32, usize)],
        elastic_implicit: bool,
    ) -> Result<(), ScatteringError> {
        let sizes = calculate_dist_array_sizes(land, and);

        // Elastic always comes first in LAND when it is not listed in MTR
        let elastic_increment = usize::from(elastic_implicit);
        let entries = elastic_implicit
            .then_some((ELASTIC_MT, 0))
            .into_iter()
            .chain(ordered.iter().map(|&(mt, index)| (mt, index + elastic_increment)));

        for (mt, land_index) in entries {
            // A reaction without a LAND entry stays unclassified
            let Some(&value) = land.get(land_index) else { continue };
            match xss_int(value) {
                locator if locator > 0 => {
                    let location = RecordLocation { start: (locator - 1) as usize, size: sizes[land_index] };
                    self.angular.insert(mt, location);
                },
                0 => {
                    self.isotropic.insert(mt);
                },
                -1 => {
                    self.coupled.insert(mt);
                },
                value => {
                    return Err(ScatteringError::UnknownAngularLocator { table: table.to_string(), mt, value });
                },
            }
        }

        let classified = self.angular.len() + self.isotropic.len() + self.coupled.len();
        let expected = self.ordering.len() + elastic_increment;
        if classified != expected {
            return Err(ScatteringError::IncompleteClassification { table: table.to_string(), classified, expected });
        }
        Ok(())
    }

    fn locate_energy(&mut self, table: &str, ldlw: &[f64], dlw: &[f64], ordered: &[(u32, usize)]) -> Result<(), ScatteringError> {
        let sizes = calculate_dist_array_sizes(ldlw, dlw);
        for &(mt, index) in ordered {
            let locator = ldlw.get(index).map_or(0, |&value| xss_int(value));
            if locator <= 0 {
                return Err(ScatteringError::MissingEnergyDistribution { table: table.to_string(), mt });
            }
            self.energy.insert(mt, RecordLocation { start: (locator - 1) as usize, size: sizes[index] });
        }
        Ok(())
    }

    pub fn ordering(&self) -> &HashMap<u32, usize> {
        &self.ordering
    }

    pub fn cm_scattering(&self) -> &HashMap<u32, bool> {
        &self.cm_scattering
    }

    pub fn frame(&self, mt: u32) -> Option<FrameOfReference> {
        self.cm_scattering.get(&mt).map(|&is_cm| FrameOfReference::from_center_of_mass_flag(is_cm))
    }

    pub fn multiplicity(&self) -> &HashMap<u32, ReactionMultiplicity> {
        &self.multiplicity
    }

    pub fn angular(&self) -> &HashMap<u32, RecordLocation> {
        &self.angular
    }

    pub fn isotropic(&self) -> &HashSet<u32> {
        &self.isotropic
    }

    pub fn coupled(&self) -> &HashSet<u32> {
        &self.coupled
    }

    pub fn energy(&self) -> &HashMap<u32, RecordLocation> {
        &self.energy
    }
}
