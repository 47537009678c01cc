use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use thiserror::Error;

use crate::arrays::{BlockId, JxsArray, NxsArray, NxsId, JXS_LEN, NXS_LEN, fortran_to_index};
use crate::extractor::BlockView;
use crate::utils::{xss_count, xss_int};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractorError {
    #[error("{block} is always expected, but {block} was not found")]
    MissingExpectedBlock { block: BlockId },
}

// Location of a block in the XSS array, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockLocation {
    pub start: usize,
    pub length: usize,
}

//=====================================================================
// Interprets the XSS array of a continuous energy neutron ACE table,
// using the NXS and JXS arrays to locate its data blocks.
//
// The extractor owns its own copies of NXS and JXS, while the (large)
// XSS array is shared. Block locations are computed the first time a
// block is requested and cached for the lifetime of the extractor.
//=====================================================================
#[derive(Debug)]
pub struct XssBlockExtractor {
    pub(crate) nxs: NxsArray,
    pub(crate) jxs: JxsArray,
    pub(crate) xss: Arc<[f64]>,
    locations: DashMap<BlockId, BlockLocation>,
}

impl XssBlockExtractor {
    pub fn new(nxs: &[i64], jxs: &[i64], xss: Arc<[f64]>) -> Self {
        let extractor = Self {
            nxs: NxsArray::from_slice(nxs),
            jxs: JxsArray::from_slice(jxs),
            xss,
            locations: DashMap::new(),
        };

        // The energy grid is needed by almost everything, get it up front
        let start = Instant::now();
        extractor.extract_block(BlockId::ESZ);
        log::debug!("⚛️  ESZ time ⚛️ : {} us", start.elapsed().as_micros());

        extractor
    }

    //=================================================================
    // Raw array access
    //=================================================================
    pub fn nxs(&self) -> &NxsArray {
        &self.nxs
    }

    pub fn jxs(&self) -> &JxsArray {
        &self.jxs
    }

    pub fn xss(&self) -> &Arc<[f64]> {
        &self.xss
    }

    // Raw NXS value, index must be below the NXS length
    pub fn query_nxs(&self, index: usize) -> i64 {
        if index >= NXS_LEN {
            panic!("NXS index {} is out of range, the NXS array has {} entries", index, NXS_LEN);
        }
        self.nxs[index]
    }

    // Raw JXS value, index must be below the JXS length. Sentinels such
    // as -1 are returned untouched.
    pub fn query_jxs(&self, index: usize) -> i64 {
        if index >= JXS_LEN {
            panic!("JXS index {} is out of range, the JXS array has {} entries", index, JXS_LEN);
        }
        self.jxs[index]
    }

    // A block has data if JXS points somewhere, and the NXS counter which
    // sizes the block (if there is one) is non-zero.
    pub fn has_data(&self, block: BlockId) -> bool {
        if self.jxs.get(block) <= 0 {
            return false;
        }
        let counter = match block {
            BlockId::MTR | BlockId::LQR | BlockId::TYR | BlockId::LSIG | BlockId::SIG => Some(NxsId::Ntr),
            BlockId::LDLW | BlockId::DLW => Some(NxsId::Nr),
            BlockId::MTRP | BlockId::LSIGP | BlockId::SIGP | BlockId::LANDP
                | BlockId::LDLWP | BlockId::DLWP | BlockId::YP => Some(NxsId::Ntrp),
            BlockId::DNU | BlockId::BDD | BlockId::DNEDL | BlockId::DNED => Some(NxsId::Npcr),
            BlockId::PTYPE | BlockId::NTRO | BlockId::NEXT => Some(NxsId::Ntype),
            _ => None,
        };
        counter.is_none_or(|id| self.nxs.get(id) > 0)
    }

    //=================================================================
    // Generic block extraction
    //=================================================================
    pub fn extract_block(&self, block: BlockId) -> BlockView<'_> {
        if let Some(location) = self.locations.get(&block) {
            return self.view(*location);
        }
        let location = self.locate(block);
        // Another thread may have got here first, keep whichever landed
        let location = *self.locations.entry(block).or_insert(location);
        self.view(location)
    }

    pub fn block_location(&self, block: BlockId) -> BlockLocation {
        let view = self.extract_block(block);
        BlockLocation { start: view.offset(), length: view.len() }
    }

    fn view(&self, location: BlockLocation) -> BlockView<'_> {
        if location.length == 0 {
            return BlockView::empty();
        }
        BlockView::new(&self.xss, location.start, location.length)
    }

    fn locate(&self, block: BlockId) -> BlockLocation {
        if !self.has_data(block) {
            return BlockLocation::default();
        }
        let start = match self.jxs.start_index(block) {
            Some(start) if start < self.xss.len() => start,
            _ => {
                log::warn!("{} starts at {} which is past the end of XSS ({} entries)",
                    block, self.jxs.get(block), self.xss.len());
                return BlockLocation::default();
            }
        };
        let mut length = self.block_length(block, start);
        if start + length > self.xss.len() {
            log::warn!("{} runs past the end of XSS, truncating from {} to {} entries",
                block, length, self.xss.len() - start);
            length = self.xss.len() - start;
        }
        BlockLocation { start, length }
    }

    // Fetch a value from XSS, None past the end of the array
    #[inline]
    pub(crate) fn xss_value(&self, index: usize) -> Option<f64> {
        self.xss.get(index).copied()
    }

    //=================================================================
    // ESZ
    //=================================================================
    pub fn extract_esz_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::ESZ)
    }

    // The ESZ block holds five consecutive arrays of NES values
    fn esz_component(&self, component: usize) -> BlockView<'_> {
        let nes = self.nxs.nes();
        self.extract_esz_block().sub_view(component * nes, nes)
    }

    pub fn extract_energy_grid(&self) -> BlockView<'_> {
        self.esz_component(0)
    }

    pub fn extract_total_cross_section(&self) -> BlockView<'_> {
        self.esz_component(1)
    }

    pub fn extract_absorption_cross_section(&self) -> BlockView<'_> {
        self.esz_component(2)
    }

    pub fn extract_elastic_cross_section(&self) -> BlockView<'_> {
        self.esz_component(3)
    }

    pub fn extract_average_heating_numbers(&self) -> BlockView<'_> {
        self.esz_component(4)
    }

    //=================================================================
    // Fission nu
    //=================================================================
    pub fn extract_nu_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::NU)
    }

    // If both prompt and total nu are given, the block leads with -KNU
    // followed by the prompt array (KNU entries) and then the total
    // array. Otherwise the single array is returned.
    pub fn extract_prompt_nu_block(&self) -> BlockView<'_> {
        let nu = self.extract_nu_block();
        match nu.first().map(|&val| xss_int(val)) {
            Some(knu) if knu < 0 => nu.sub_view(1, knu.unsigned_abs() as usize),
            _ => nu,
        }
    }

    pub fn extract_total_nu_block(&self) -> BlockView<'_> {
        let nu = self.extract_nu_block();
        match nu.first().map(|&val| xss_int(val)) {
            Some(knu) if knu < 0 => {
                let total_start = 1 + knu.unsigned_abs() as usize;
                nu.sub_view(total_start, nu.len().saturating_sub(total_start))
            },
            _ => nu,
        }
    }

    //=================================================================
    // Reaction data
    //=================================================================
    pub fn extract_mtr_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::MTR)
    }

    pub fn extract_lqr_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LQR)
    }

    pub fn extract_tyr_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::TYR)
    }

    pub fn extract_lsig_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LSIG)
    }

    pub fn extract_sig_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::SIG)
    }

    // Every neutron table carries angular data, at least for elastic
    // scattering.
    pub fn extract_land_block(&self) -> Result<BlockView<'_>, ExtractorError> {
        self.extract_expected_block(BlockId::LAND)
    }

    pub fn extract_and_block(&self) -> Result<BlockView<'_>, ExtractorError> {
        self.extract_expected_block(BlockId::AND)
    }

    fn extract_expected_block(&self, block: BlockId) -> Result<BlockView<'_>, ExtractorError> {
        if !self.has_data(block) {
            return Err(ExtractorError::MissingExpectedBlock { block });
        }
        Ok(self.extract_block(block))
    }

    pub fn extract_ldlw_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LDLW)
    }

    pub fn extract_dlw_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::DLW)
    }

    //=================================================================
    // Photon production data
    //=================================================================
    pub fn extract_gpd_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::GPD)
    }

    pub fn extract_mtrp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::MTRP)
    }

    pub fn extract_lsigp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LSIGP)
    }

    pub fn extract_sigp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::SIGP)
    }

    pub fn extract_landp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LANDP)
    }

    // Legitimately absent when every photon angular distribution is
    // isotropic
    pub fn extract_andp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::ANDP)
    }

    pub fn extract_ldlwp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LDLWP)
    }

    pub fn extract_dlwp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::DLWP)
    }

    pub fn extract_yp_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::YP)
    }

    //=================================================================
    // Everything else
    //=================================================================
    pub fn extract_fis_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::FIS)
    }

    pub fn extract_lunr_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::LUNR)
    }

    pub fn extract_dnu_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::DNU)
    }

    pub fn extract_bdd_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::BDD)
    }

    pub fn extract_dnedl_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::DNEDL)
    }

    pub fn extract_dned_block(&self) -> BlockView<'_> {
        self.extract_block(BlockId::DNED)
    }

    // Walk the energy distribution chain of every reaction and collect
    // the law of each sub-distribution found along the way.
    pub fn extract_ace_laws(&self) -> Vec<i64> {
        let ldlw = self.extract_ldlw_block();
        let dlw = self.extract_dlw_block();
        let mut laws = Vec::new();

        for &locator in ldlw.iter() {
            let mut next = fortran_to_index(xss_int(locator));
            // A chain can never have more links than DLW has entries
            let mut remaining_links = dlw.len();
            while let Some(index) = next {
                if remaining_links == 0 || index + 1 >= dlw.len() {
                    break;
                }
                remaining_links -= 1;
                laws.push(xss_int(dlw[index + 1]));
                next = fortran_to_index(xss_int(dlw[index]));
            }
        }
        laws
    }

    //=================================================================
    // Content queries
    //=================================================================
    pub fn has_fission_data(&self) -> bool {
        self.has_data(BlockId::NU) || self.has_data(BlockId::FIS)
    }

    pub fn has_delayed_neutron_data(&self) -> bool {
        self.has_data(BlockId::DNU) && self.nxs.npcr() > 0
    }

    pub fn has_unresolved_resonance_data(&self) -> bool {
        self.has_data(BlockId::LUNR)
    }

    pub fn has_photon_production_data(&self) -> bool {
        self.has_data(BlockId::MTRP)
    }

    pub(crate) fn xss_count_at(&self, index: usize) -> usize {
        self.xss_value(index).map_or(0, xss_count)
    }
}
