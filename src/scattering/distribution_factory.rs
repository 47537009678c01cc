use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use rayon::prelude::*;

use crate::distributions::{
    AceLaw, EnergyDependentAngularDistribution, FrameOfReference, ParticlePair, ScatteringDistribution,
    TwoTableSampling,
};
use crate::extractor::{ExtractorError, XssBlockExtractor};
use crate::scattering::classification::{ReactionClassification, RecordLocation, ELASTIC_MT};
use crate::scattering::{angular_factory, energy_factory, ScatteringError};

// The locator and data blocks scattering distributions are built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringBlocks<'a> {
    pub mtr: &'a [f64],
    pub tyr: Option<&'a [f64]>,
    pub land: &'a [f64],
    pub and: &'a [f64],
    pub ldlw: &'a [f64],
    pub dlw: &'a [f64],
}

impl<'a> ScatteringBlocks<'a> {
    // Outgoing neutrons of a neutron table
    pub fn neutron(extractor: &'a XssBlockExtractor) -> Result<Self, ExtractorError> {
        Ok(Self {
            mtr: extractor.extract_mtr_block().data(),
            tyr: Some(extractor.extract_tyr_block().data()),
            land: extractor.extract_land_block()?.data(),
            and: extractor.extract_and_block()?.data(),
            ldlw: extractor.extract_ldlw_block().data(),
            dlw: extractor.extract_dlw_block().data(),
        })
    }

    // Photons produced in neutron reactions, there is no TYR block so every
    // photon is emitted in the lab
    pub fn photon_production(extractor: &'a XssBlockExtractor) -> Self {
        Self {
            mtr: extractor.extract_mtrp_block().data(),
            tyr: None,
            land: extractor.extract_landp_block().data(),
            and: extractor.extract_andp_block().data(),
            ldlw: extractor.extract_ldlwp_block().data(),
            dlw: extractor.extract_dlwp_block().data(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactoryConfig {
    pub angular_sampling: TwoTableSampling,
}

//=====================================================================
// Builds the scattering distribution of every reaction of one particle
// pair in an ACE table. Reactions are classified once at construction,
// distributions are built on request and shared afterwards.
//=====================================================================
#[derive(Debug)]
pub struct ScatteringDistributionFactory<'a> {
    table_name: String,
    atomic_weight_ratio: f64,
    pair: ParticlePair,
    blocks: ScatteringBlocks<'a>,
    config: FactoryConfig,
    classification: ReactionClassification,
    distributions: DashMap<u32, Arc<ScatteringDistribution>>,
}

impl<'a> ScatteringDistributionFactory<'a> {
    pub fn new(
        table_name: &str,
        atomic_weight_ratio: f64,
        pair: ParticlePair,
        blocks: ScatteringBlocks<'a>,
        config: FactoryConfig,
    ) -> Result<Self, ScatteringError> {
        let start = Instant::now();
        let classification = ReactionClassification::new(
            table_name,
            blocks.mtr,
            blocks.tyr,
            blocks.land,
            blocks.and,
            blocks.ldlw,
            blocks.dlw,
            pair.is_elastic_implicit(),
        )?;
        log::debug!(
            "⚛️  {} {} classification time ⚛️ : {} us",
            table_name, pair, start.elapsed().as_micros()
        );

        Ok(Self {
            table_name: table_name.to_string(),
            atomic_weight_ratio,
            pair,
            blocks,
            config,
            classification,
            distributions: DashMap::new(),
        })
    }

    // Pick the blocks of `extractor` which hold the distributions of `pair`.
    // Photonuclear tables keep their outgoing neutrons in the same blocks
    // as neutron tables.
    pub fn from_extractor(
        table_name: &str,
        atomic_weight_ratio: f64,
        pair: ParticlePair,
        extractor: &'a XssBlockExtractor,
        config: FactoryConfig,
    ) -> Result<Self, ScatteringError> {
        let blocks = match pair {
            ParticlePair::NeutronNeutron | ParticlePair::PhotonNeutron => ScatteringBlocks::neutron(extractor)?,
            ParticlePair::NeutronPhoton => ScatteringBlocks::photon_production(extractor),
        };
        Self::new(table_name, atomic_weight_ratio, pair, blocks, config)
    }

    pub fn does_reaction_have_scattering_distribution(&self, mt: u32) -> bool {
        self.classification.energy().contains_key(&mt) || (self.is_elastic_implicit() && mt == ELASTIC_MT)
    }

    pub fn reactions_with_scattering_distributions(&self) -> BTreeSet<u32> {
        let mut reactions: BTreeSet<u32> = self.classification.energy().keys().copied().collect();
        if self.is_elastic_implicit() {
            reactions.insert(ELASTIC_MT);
        }
        reactions
    }

    // The distribution of a single reaction. Each distribution is built
    // once, later requests get the same instance.
    pub fn create_scattering_distribution(&self, mt: u32) -> Result<Arc<ScatteringDistribution>, ScatteringError> {
        if mt == ELASTIC_MT && !self.pair.is_elastic_possible() {
            return Err(ScatteringError::ElasticNotPossible { pair: self.pair });
        }
        if !self.does_reaction_have_scattering_distribution(mt) {
            return Err(ScatteringError::NoScatteringDistribution { table: self.table_name.clone(), mt });
        }
        if let Some(distribution) = self.distributions.get(&mt) {
            return Ok(Arc::clone(distribution.value()));
        }

        let distribution = Arc::new(self.build_distribution(mt)?);
        Ok(Arc::clone(self.distributions.entry(mt).or_insert(distribution).value()))
    }

    // Build every reaction's distribution, in parallel
    pub fn create_all_scattering_distributions(&self) -> Result<BTreeMap<u32, Arc<ScatteringDistribution>>, ScatteringError> {
        let start = Instant::now();
        let reactions: Vec<u32> = self.reactions_with_scattering_distributions().into_iter().collect();
        let distributions = reactions
            .par_iter()
            .map(|&mt| self.create_scattering_distribution(mt).map(|distribution| (mt, distribution)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        log::debug!(
            "⚛️  {} {} scattering distributions time ⚛️ : {} us",
            self.table_name, self.pair, start.elapsed().as_micros()
        );
        Ok(distributions)
    }

    fn build_distribution(&self, mt: u32) -> Result<ScatteringDistribution, ScatteringError> {
        let awr = self.atomic_weight_ratio;

        if self.classification.coupled().contains(&mt) {
            let (dlw, start) = self.energy_record(mt)?;
            let frame = self.frame(mt);
            return match energy_factory::determine_coupled_distribution(dlw, &self.table_name, mt)? {
                AceLaw::KalbachMann => Ok(ScatteringDistribution::Law44(Arc::new(
                    energy_factory::create_ace_law44_distribution(dlw, start, &self.table_name, mt, frame, awr)?,
                ))),
                AceLaw::CorrelatedEnergyAngle => Ok(ScatteringDistribution::Law61(Arc::new(
                    energy_factory::create_ace_law61_distribution(dlw, start, &self.table_name, mt, frame, awr)?,
                ))),
                law => Err(ScatteringError::UnsupportedCoupledLaw { table: self.table_name.clone(), mt, law: law as i64 }),
            };
        }

        let angular = self.create_angular_distribution(mt)?;
        if self.is_elastic_implicit() && mt == ELASTIC_MT {
            return Ok(ScatteringDistribution::Elastic { angular, atomic_weight_ratio: awr });
        }

        let (dlw, start) = self.energy_record(mt)?;
        let energy = energy_factory::create_distribution(dlw, start, &self.table_name, mt, awr)?;
        let frame = self.frame(mt);
        if energy.law() == AceLaw::LevelScattering && !frame.is_center_of_mass() {
            return Err(ScatteringError::Law3NotCenterOfMass { table: self.table_name.clone(), mt });
        }
        Ok(ScatteringDistribution::IndependentEnergyAngle {
            energy: Arc::new(energy),
            angular,
            frame,
            atomic_weight_ratio: awr,
        })
    }

    fn create_angular_distribution(&self, mt: u32) -> Result<Arc<EnergyDependentAngularDistribution>, ScatteringError> {
        match self.classification.angular().get(&mt) {
            Some(&location) => {
                let and = sub_array(self.blocks.and, location);
                let distribution = angular_factory::create_distribution(
                    and, location.start, &self.table_name, mt, self.config.angular_sampling,
                )?;
                Ok(Arc::new(distribution))
            },
            None => Ok(angular_factory::create_isotropic_distribution()),
        }
    }

    fn energy_record(&self, mt: u32) -> Result<(&'a [f64], usize), ScatteringError> {
        let location = self.classification.energy().get(&mt)
            .ok_or_else(|| ScatteringError::MissingEnergyDistribution { table: self.table_name.clone(), mt })?;
        Ok((sub_array(self.blocks.dlw, *location), location.start))
    }

    fn frame(&self, mt: u32) -> FrameOfReference {
        self.classification.frame(mt).unwrap_or(FrameOfReference::Laboratory)
    }

    fn is_elastic_implicit(&self) -> bool {
        self.pair.is_elastic_implicit()
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    pub fn pair(&self) -> ParticlePair {
        self.pair
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    pub fn blocks(&self) -> &ScatteringBlocks<'a> {
        &self.blocks
    }

    pub fn classification(&self) -> &ReactionClassification {
        &self.classification
    }

    // AND record of a reaction with an explicit angular distribution
    pub fn angular_sub_array(&self, mt: u32) -> Option<&'a [f64]> {
        self.classification.angular().get(&mt).map(|&location| sub_array(self.blocks.and, location))
    }

    pub fn angular_start_index(&self, mt: u32) -> Option<usize> {
        self.classification.angular().get(&mt).map(|location| location.start)
    }

    pub fn energy_sub_array(&self, mt: u32) -> Option<&'a [f64]> {
        self.classification.energy().get(&mt).map(|&location| sub_array(self.blocks.dlw, location))
    }

    pub fn energy_start_index(&self, mt: u32) -> Option<usize> {
        self.classification.energy().get(&mt).map(|location| location.start)
    }
}

// A record clipped to its block. Locators past the end give an empty
// record, which fails when it is parsed.
fn sub_array(block: &[f64], location: RecordLocation) -> &[f64] {
    let start = location.start.min(block.len());
    let end = location.start.saturating_add(location.size).min(block.len());
    &block[start..end]
}
