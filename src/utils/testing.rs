//=====================================================================
// Utilities shared by the tests of every module. The main piece is a
// small synthetic neutron ACE table, built once and reused, with all
// JXS locators computed as its blocks are appended.
//=====================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use lazy_static::lazy_static;

use crate::arrays::{BlockId, JXS_LEN, NXS_LEN, NxsId};
use crate::extractor::XssBlockExtractor;

pub const SYNTHETIC_TABLE_NAME: &str = "1010.800nc";
pub const SYNTHETIC_ZAID: &str = "1010.00c";
pub const SYNTHETIC_AWR: f64 = 10.0;
pub const SYNTHETIC_KT: f64 = 2.5301e-08;

lazy_static! {
    pub static ref SYNTHETIC_TABLE: SyntheticTable = build_synthetic_table();
}

// Install the logger for a test run, safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn synthetic_extractor() -> XssBlockExtractor {
    init_logging();
    let table = &*SYNTHETIC_TABLE;
    XssBlockExtractor::new(&table.nxs, &table.jxs, table.xss.clone())
}

#[derive(Debug, Clone)]
pub struct SyntheticTable {
    pub nxs: Vec<i64>,
    pub jxs: Vec<i64>,
    pub xss: Arc<[f64]>,
}

impl SyntheticTable {
    // Write the table out in the ASCII ACE layout (2.0.1 header)
    pub fn write_ascii_ace(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "2.0.1          {}          synthetic", SYNTHETIC_TABLE_NAME)?;
        writeln!(writer, "{:12.6} {:12.4E} 2024-01-01    2", SYNTHETIC_AWR, SYNTHETIC_KT)?;
        writeln!(writer, "{:>10} {:12.6} {:12.4E}   01/01/24", SYNTHETIC_ZAID, SYNTHETIC_AWR, SYNTHETIC_KT)?;
        writeln!(writer, "synthetic neutron table used for testing                mat9999")?;
        // IZAW, 16 pairs
        for _ in 0..4 {
            writeln!(writer, "{}", "      0   0.000000".repeat(4))?;
        }
        for chunk in self.nxs.chunks(8).chain(self.jxs.chunks(8)) {
            let line: String = chunk.iter().map(|val| format!("{:9}", val)).collect();
            writeln!(writer, "{}", line)?;
        }
        for chunk in self.xss.chunks(4) {
            let line: String = chunk.iter().map(|&val| format_xss_value(val)).collect();
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }
}

// Integers are written as integers, everything else in the shortest
// form which reads back to the same double
fn format_xss_value(val: f64) -> String {
    if val.fract() == 0.0 && val.abs() < 1.0e15 {
        format!(" {:>19}", val as i64)
    } else {
        format!(" {:>19e}", val)
    }
}

//=====================================================================
// Builder for the synthetic table
//=====================================================================
struct TableBuilder {
    nxs: [i64; NXS_LEN],
    jxs: [i64; JXS_LEN],
    xss: Vec<f64>,
}

impl TableBuilder {
    fn new() -> Self {
        Self { nxs: [0; NXS_LEN], jxs: [0; JXS_LEN], xss: Vec::new() }
    }

    // Start a block at the current end of XSS
    fn block(&mut self, block: BlockId, data: &[f64]) {
        self.jxs[block.jxs_index()] = self.xss.len() as i64 + 1;
        self.xss.extend_from_slice(data);
    }
}

// Builds a data block (DLW, AND, ...) whose internal locators are 1-based
// and relative to the start of the block.
#[derive(Default)]
struct RecordBuilder {
    data: Vec<f64>,
}

impl RecordBuilder {
    fn locator(&self) -> f64 {
        (self.data.len() + 1) as f64
    }

    fn push(&mut self, values: &[f64]) {
        self.data.extend_from_slice(values);
    }

    // Energy distribution header with a single law used at all energies
    // LNW, LAW, IDAT, then a law probability table of two points
    fn law_header(&mut self, law: f64) {
        let idat = self.data.len() + 9 + 1;
        self.push(&[0.0, law, idat as f64, 0.0, 2.0, 1.0e-11, 20.0, 1.0, 1.0]);
    }
}

fn build_dlw() -> (Vec<f64>, Vec<f64>) {
    let mut dlw = RecordBuilder::default();
    let mut ldlw = Vec::new();

    // MT 16, law 44 (Kalbach-Mann)
    ldlw.push(dlw.locator());
    dlw.law_header(44.0);
    let first = dlw.locator() + 6.0;
    dlw.push(&[0.0, 2.0, 11.0, 20.0, first, first + 12.0]);
    dlw.push(&[2.0, 2.0, 0.0, 2.0, 0.5, 0.5, 0.0, 1.0, 0.1, 0.2, 0.5, 1.0]);
    dlw.push(&[2.0, 2.0, 0.0, 4.0, 0.25, 0.25, 0.0, 1.0, 0.3, 0.4, 1.5, 2.0]);

    // MT 18, law 11 (Watt spectrum)
    ldlw.push(dlw.locator());
    dlw.law_header(11.0);
    dlw.push(&[0.0, 2.0, 1.0e-11, 20.0, 0.988, 0.988]);
    dlw.push(&[0.0, 2.0, 1.0e-11, 20.0, 2.249, 2.249]);
    dlw.push(&[-20.0]);

    // MT 51, law 3 (level scattering, Q = -0.5 MeV)
    ldlw.push(dlw.locator());
    dlw.law_header(3.0);
    let a = SYNTHETIC_AWR;
    dlw.push(&[(a + 1.0) / a * 0.5, (a / (a + 1.0)).powi(2)]);

    // MT 91, law 61 (correlated energy-angle)
    ldlw.push(dlw.locator());
    dlw.law_header(61.0);
    let first = dlw.locator() + 6.0;
    let second = first + 10.0 + 11.0;
    dlw.push(&[0.0, 2.0, 2.0, 20.0, first, second]);
    let angular_table = first + 10.0;
    dlw.push(&[2.0, 2.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, angular_table]);
    dlw.push(&[2.0, 3.0, -1.0, 0.0, 1.0, 0.25, 0.75, 0.25, 0.0, 0.5, 1.0]);
    dlw.push(&[1.0, 2.0, 0.0, 2.0, 0.5, 0.5, 0.0, 1.0, 0.0, 0.0]);

    (ldlw, dlw.data)
}

fn build_and() -> (Vec<f64>, Vec<f64>) {
    let mut and = RecordBuilder::default();
    // Elastic, isotropic at low energy then 32 equiprobable bins
    let elastic = and.locator();
    let bins = and.locator() + 5.0;
    and.push(&[2.0, 1.0e-11, 20.0, 0.0, bins]);
    let cosines: Vec<f64> = (0..33).map(|i| -1.0 + 2.0 * (i as f64 / 32.0).powi(2)).collect();
    and.push(&cosines);

    // MT 51, tabulated lin-lin at low energy then isotropic
    let level = and.locator();
    let tabulated = and.locator() + 5.0;
    and.push(&[2.0, 1.0e-11, 20.0, -tabulated, 0.0]);
    and.push(&[2.0, 3.0, -1.0, 0.0, 1.0, 0.25, 0.75, 0.25, 0.0, 0.5, 1.0]);

    // LAND: elastic, then MT 16 (coupled), 18 (isotropic), 51, 91 (coupled)
    let land = vec![elastic, -1.0, 0.0, level, -1.0];
    (land, and.data)
}

fn build_dned() -> Vec<f64> {
    // One precursor group, law 4 continuous tabular
    let mut dned = RecordBuilder::default();
    dned.law_header(4.0);
    let first = dned.locator() + 6.0;
    dned.push(&[0.0, 2.0, 1.0e-11, 20.0, first, first + 11.0]);
    dned.push(&[2.0, 3.0, 0.0, 0.5, 1.0, 0.0, 2.0, 0.0, 0.0, 0.5, 1.0]);
    dned.push(&[1.0, 2.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0]);
    dned.data
}

fn build_synthetic_table() -> SyntheticTable {
    let mut builder = TableBuilder::new();
    let energies = [1.0e-11, 1.0, 20.0];

    // ESZ: energy, total, absorption, elastic, heating
    let mut esz = energies.to_vec();
    esz.extend_from_slice(&[25.0, 8.0, 3.0]);
    esz.extend_from_slice(&[5.0, 2.0, 0.5]);
    esz.extend_from_slice(&[20.0, 4.0, 1.0]);
    esz.extend_from_slice(&[0.0, 0.5, 2.0]);
    builder.block(BlockId::ESZ, &esz);

    // Prompt nu (polynomial) and total nu (tabulated)
    builder.block(BlockId::NU, &[
        -4.0,
        1.0, 2.0, 2.4, 0.1,
        2.0, 0.0, 2.0, 1.0e-11, 20.0, 2.42, 2.9,
    ]);

    builder.block(BlockId::MTR, &[16.0, 18.0, 51.0, 91.0, 102.0]);
    builder.block(BlockId::LQR, &[-11.0, 193.0, -0.5, -1.0, 6.0]);
    builder.block(BlockId::TYR, &[-2.0, 19.0, -1.0, -1.0, 0.0]);
    builder.block(BlockId::LSIG, &[1.0, 6.0, 11.0, 16.0, 21.0]);
    let sig: Vec<f64> = (0..5)
        .flat_map(|i| [1.0, 3.0, 0.1 * i as f64, 0.2, 0.3])
        .collect();
    builder.block(BlockId::SIG, &sig);

    let (land, and) = build_and();
    builder.block(BlockId::LAND, &land);
    builder.block(BlockId::AND, &and);
    let (ldlw, dlw) = build_dlw();
    builder.block(BlockId::LDLW, &ldlw);
    builder.block(BlockId::DLW, &dlw);

    // Photon production: one capture photon line at 2.2 MeV
    builder.block(BlockId::GPD, &[0.1, 0.2, 0.3]);
    builder.block(BlockId::MTRP, &[102001.0]);
    builder.block(BlockId::LSIGP, &[1.0]);
    builder.block(BlockId::SIGP, &[13.0, 1.0, 3.0, 0.1, 0.2, 0.3]);
    builder.block(BlockId::LANDP, &[0.0]);
    builder.block(BlockId::LDLWP, &[1.0]);
    builder.block(BlockId::DLWP, &[0.0, 2.0, 10.0, 0.0, 2.0, 1.0e-11, 20.0, 1.0, 1.0, 0.0, 2.2]);
    builder.block(BlockId::YP, &[1.0, 102.0]);
    builder.block(BlockId::FIS, &[1.0, 3.0, 0.5, 0.6, 0.7]);
    // Last word of the conventional table
    builder.jxs[BlockId::END.jxs_index()] = builder.xss.len() as i64;

    // Delayed neutron data follows the conventional table
    builder.block(BlockId::DNU, &[2.0, 0.0, 2.0, 1.0e-11, 20.0, 0.0165, 0.0165]);
    builder.block(BlockId::BDD, &[0.0133, 0.0, 2.0, 1.0e-11, 20.0, 1.0, 1.0]);
    builder.block(BlockId::DNEDL, &[1.0]);
    builder.block(BlockId::DNED, &build_dned());

    builder.nxs[NxsId::XssLength.index()] = builder.xss.len() as i64;
    builder.nxs[NxsId::Za.index()] = 1010;
    builder.nxs[NxsId::Nes.index()] = energies.len() as i64;
    builder.nxs[NxsId::Ntr.index()] = 5;
    builder.nxs[NxsId::Nr.index()] = 4;
    builder.nxs[NxsId::Ntrp.index()] = 1;
    builder.nxs[NxsId::Npcr.index()] = 1;

    SyntheticTable {
        nxs: builder.nxs.to_vec(),
        jxs: builder.jxs.to_vec(),
        xss: builder.xss.into(),
    }
}

//=====================================================================
// Real ACE tables, only available for local testing
//=====================================================================
#[cfg(feature = "local")]
pub const LOCAL_HYDROGEN_ACE: &str = "test_files/1001.800nc";
#[cfg(feature = "local")]
pub const LOCAL_URANIUM_ACE: &str = "test_files/92238.800nc";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_table_layout() {
        let table = &*SYNTHETIC_TABLE;
        assert_eq!(table.nxs.len(), NXS_LEN);
        assert_eq!(table.jxs.len(), JXS_LEN);
        assert_eq!(table.nxs[0] as usize, table.xss.len());
        // Blocks are laid out in JXS order up to END
        let and = table.jxs[BlockId::AND.jxs_index()];
        let ldlw = table.jxs[BlockId::LDLW.jxs_index()];
        assert_eq!(ldlw - and, 54);
        let dlw = table.jxs[BlockId::DLW.jxs_index()];
        let gpd = table.jxs[BlockId::GPD.jxs_index()];
        assert_eq!(gpd - dlw, 118);
    }
}
