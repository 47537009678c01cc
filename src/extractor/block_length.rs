use strum::IntoEnumIterator;

use crate::arrays::BlockId;
use crate::extractor::XssBlockExtractor;
use crate::interpolation::InterpolationTable;
use crate::utils::xss_int;

// Size of the 30x20 secondary photon energy matrix carried by GPD in
// older tables
const LEGACY_GPD_MATRIX_LENGTH: usize = 600;

//=====================================================================
// The one place where the length of each block is decided.
//
// Blocks sized by NXS counters are easy. Blocks which hold a single
// interpolation table (NU, DNU, BDD) are sized by reading the table
// structure. The raw data blocks (SIG, AND, DLW, ...) store no length
// at all and run up to wherever the next block starts.
//=====================================================================
impl XssBlockExtractor {
    pub(crate) fn block_length(&self, block: BlockId, start: usize) -> usize {
        let nxs = &self.nxs;
        match block {
            BlockId::ESZ => 5 * nxs.nes(),
            BlockId::NU => self.nu_length(start),
            BlockId::MTR | BlockId::LQR | BlockId::TYR | BlockId::LSIG => nxs.ntr(),
            // Elastic scattering always has an entry
            BlockId::LAND => nxs.nr() + 1,
            BlockId::LDLW => nxs.nr(),
            BlockId::MTRP | BlockId::LSIGP | BlockId::LANDP | BlockId::LDLWP => nxs.ntrp(),
            BlockId::YP => 1 + self.xss_count_at(start),
            BlockId::FIS => 2 + self.xss_count_at(start + 1),
            BlockId::DNU => 1 + self.table_length(start + 1),
            BlockId::BDD => {
                // Each group is a decay constant followed by a probability table
                let mut length = 0;
                for _ in 0..nxs.npcr() {
                    length += 1 + self.table_length(start + length + 1);
                }
                length
            },
            BlockId::DNEDL => nxs.npcr(),
            BlockId::PTYPE | BlockId::NTRO => nxs.ntype(),
            BlockId::NEXT => 10 * nxs.ntype(),
            BlockId::GPD => self.gpd_length(start),
            BlockId::END => 1,
            BlockId::SIG | BlockId::AND | BlockId::DLW | BlockId::SIGP | BlockId::ANDP
                | BlockId::DLWP | BlockId::LUNR | BlockId::DNED => {
                self.next_block_start(start) - start
            },
        }
    }

    // NU holds either a single nu array, or -KNU followed by a prompt
    // array of KNU entries and a total nu array.
    fn nu_length(&self, start: usize) -> usize {
        let lead = self.xss_value(start).map_or(0, xss_int);
        if lead < 0 {
            let knu = lead.unsigned_abs() as usize;
            1 + knu + self.nu_array_length(start + 1 + knu)
        } else {
            self.nu_array_length(start)
        }
    }

    // LNU = 1 is a polynomial (LNU, NC, C(NC)), LNU = 2 is a tabulated
    // function (LNU, interpolation table)
    fn nu_array_length(&self, start: usize) -> usize {
        match self.xss_value(start).map(xss_int) {
            Some(1) => 2 + self.xss_count_at(start + 1),
            Some(2) => 1 + self.table_length(start + 1),
            other => {
                log::warn!("Unknown nu representation LNU={:?} at XSS index {}", other, start);
                0
            }
        }
    }

    // The old GPD layout appends a 30x20 matrix of outgoing photon
    // energies to the photon production cross section. Only old tables
    // leave room for it.
    fn gpd_length(&self, start: usize) -> usize {
        let nes = self.nxs.nes();
        let room = self.next_block_start(start) - start;
        if room >= nes + LEGACY_GPD_MATRIX_LENGTH {
            log::warn!("GPD uses the legacy layout with a 30x20 photon energy matrix");
            nes + LEGACY_GPD_MATRIX_LENGTH
        } else {
            nes
        }
    }

    fn table_length(&self, start: usize) -> usize {
        match InterpolationTable::get_table_length(start, &self.xss) {
            Ok(length) => length,
            Err(err) => {
                log::warn!("{}", err);
                self.xss.len().saturating_sub(start)
            }
        }
    }

    // First index after `start` at which another block begins. END marks
    // the last word of the conventional table, so the word after it
    // also counts as a block boundary.
    pub(crate) fn next_block_start(&self, start: usize) -> usize {
        let end_of_table = self.jxs.start_index(BlockId::END).map(|end| end + 1);
        BlockId::iter()
            .filter(|&block| block != BlockId::END)
            .filter_map(|block| self.jxs.start_index(block))
            .chain(end_of_table)
            .filter(|&candidate| candidate > start)
            .min()
            .unwrap_or(self.xss.len())
            .min(self.xss.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::arrays::{JXS_LEN, NXS_LEN};
    use crate::utils::testing::synthetic_extractor;

    #[test]
    fn test_next_block_start() {
        let extractor = synthetic_extractor();
        let ldlw = extractor.extract_ldlw_block();
        let and = extractor.extract_and_block().unwrap();
        assert_eq!(extractor.next_block_start(and.offset()), ldlw.offset());
        // Past every block we run to the end of XSS
        let dned = extractor.extract_dned_block();
        assert_eq!(extractor.next_block_start(dned.offset()), extractor.xss().len());
    }

    fn gpd_extractor(room: usize) -> XssBlockExtractor {
        // ESZ (NES=2), GPD, then MTRP after `room` entries
        let mut nxs = [0; NXS_LEN];
        nxs[2] = 2;
        nxs[5] = 1;
        let mut jxs = [0; JXS_LEN];
        jxs[BlockId::ESZ.jxs_index()] = 1;
        jxs[BlockId::GPD.jxs_index()] = 11;
        jxs[BlockId::MTRP.jxs_index()] = 11 + room as i64;
        let xss: Arc<[f64]> = vec![1.0; 10 + room + 1].into();
        nxs[0] = xss.len() as i64;
        XssBlockExtractor::new(&nxs, &jxs, xss)
    }

    #[test]
    fn test_gpd_layouts() {
        assert_eq!(gpd_extractor(2).extract_gpd_block().len(), 2);
        assert_eq!(gpd_extractor(602).extract_gpd_block().len(), 602);
    }

    #[test]
    fn test_single_nu_array() {
        // ESZ with NES=1, then a polynomial nu with three coefficients
        let mut nxs = [0; NXS_LEN];
        nxs[2] = 1;
        let mut jxs = [0; JXS_LEN];
        jxs[BlockId::ESZ.jxs_index()] = 1;
        jxs[BlockId::NU.jxs_index()] = 6;
        let xss: Arc<[f64]> = vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3.0, 2.4, 0.1, 0.01, 9.0].into();
        nxs[0] = xss.len() as i64;
        let extractor = XssBlockExtractor::new(&nxs, &jxs, xss);
        assert_eq!(extractor.extract_nu_block().len(), 5);
        assert_eq!(extractor.extract_prompt_nu_block(), extractor.extract_total_nu_block());
    }
}
