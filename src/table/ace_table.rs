use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use memmap2::MmapOptions;
use rayon::prelude::*;
use tokio::task::JoinSet;

use crate::arrays::{JxsArray, NxsArray, JXS_LEN, NXS_LEN};
use crate::extractor::XssBlockExtractor;
use crate::header::Header;
use crate::utils;

// IZAW (4 lines), NXS (2 lines) and JXS (4 lines) sit between the header
// and the XSS array
const IZAW_NXS_JXS_LENGTH: usize = 10;
const IZAW_LEN: usize = 32;

//=====================================================================
// An ASCII ACE table loaded into memory: its header plus the NXS, JXS
// and XSS arrays that the block extractor works on.
//=====================================================================
#[derive(Clone, Debug)]
pub struct AceTable {
    pub header: Header,
    pub nxs: NxsArray,
    pub jxs: JxsArray,
    pub xss: Arc<[f64]>,
}

impl AceTable {
    pub async fn from_ACE<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let path: PathBuf = file_path.as_ref().to_path_buf();
        let display = path.display().to_string();
        tokio::task::spawn_blocking(move || Self::read_ACE(&path))
            .await
            .with_context(|| format!("ACE loading task for {} did not complete", display))?
    }

    fn read_ACE(path: &Path) -> Result<Self> {
        let start = Instant::now();
        let file = File::open(path)
            .with_context(|| format!("Failed to open ACE file: {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let header = Header::from_ACE(&mut reader)
            .with_context(|| format!("Failed to read header from ACE file {}", path.display()))?;

        // The IZAW, NXS, and JXS arrays have different line lengths than the
        // XSS array, read them as whole lines
        let array_lines = utils::read_lines(&mut reader, IZAW_NXS_JXS_LENGTH)
            .with_context(|| format!("Failed to read the NXS and JXS arrays from {}", path.display()))?;
        let tokens: Vec<&str> = array_lines.iter().flat_map(|line| line.split_whitespace()).collect();
        if tokens.len() != IZAW_LEN + NXS_LEN + JXS_LEN {
            anyhow::bail!(
                "Expected {} IZAW, NXS and JXS entries in {}, found {}",
                IZAW_LEN + NXS_LEN + JXS_LEN, path.display(), tokens.len()
            );
        }
        let integers = tokens[IZAW_LEN..]
            .iter()
            .map(|token| token.parse::<i64>().with_context(|| format!("Invalid NXS/JXS entry '{}'", token)))
            .collect::<Result<Vec<_>>>()?;
        let nxs = NxsArray::from_slice(&integers[..NXS_LEN]);
        let jxs = JxsArray::from_slice(&integers[NXS_LEN..]);

        // Everything after this point is the XSS array, map it and parse it in parallel
        let xss_offset = reader.stream_position()? as usize;
        let file = reader.into_inner();
        let mmap = unsafe { MmapOptions::new().map(&file) }
            .with_context(|| format!("Failed to memory map ACE file: {}", path.display()))?;
        let xss = parse_xss(&mmap[xss_offset..])
            .with_context(|| format!("Failed to parse the XSS array of {}", path.display()))?;

        if xss.len() != nxs.xss_len() {
            anyhow::bail!(
                "NXS gives an XSS length of {} but {} values were read from {}",
                nxs.xss_len(), xss.len(), path.display()
            );
        }

        log::info!(
            "Loaded ACE table {} ({} XSS entries) in {} us",
            header.table_name(), xss.len(), start.elapsed().as_micros()
        );
        Ok(Self { header, nxs, jxs, xss: xss.into() })
    }

    // Extractor over this table, sharing its XSS array
    pub fn extractor(&self) -> XssBlockExtractor {
        XssBlockExtractor::new(&self.nxs[..], &self.jxs[..], self.xss.clone())
    }
}

// Load several ACE tables concurrently. Tables are returned in the order
// their paths were given.
pub async fn load_tables<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<AceTable>> {
    let mut join_set = JoinSet::new();
    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref().to_path_buf();
        join_set.spawn(async move { (index, AceTable::from_ACE(path).await) });
    }

    let mut tables = Vec::with_capacity(paths.len());
    while let Some(joined) = join_set.join_next().await {
        let (index, table) = joined.context("ACE loading task panicked")?;
        tables.push((index, table?));
    }
    tables.sort_by_key(|&(index, _)| index);
    Ok(tables.into_iter().map(|(_, table)| table).collect())
}

// Parse whitespace separated numbers, in batches of lines
fn parse_xss(bytes: &[u8]) -> Result<Vec<f64>> {
    const BATCH_SIZE: usize = 1000;
    let lines: Vec<&[u8]> = bytes.split(|&byte| byte == b'\n').collect();
    let batches = lines
        .par_chunks(BATCH_SIZE)
        .map(|batch| -> Result<Vec<f64>> {
            let mut values = Vec::with_capacity(batch.len() * 4);
            for line in batch {
                for token in line.split(|byte| byte.is_ascii_whitespace()).filter(|token| !token.is_empty()) {
                    let value: f64 = fast_float::parse(token).map_err(|_| {
                        anyhow::anyhow!("Invalid token \"{}\" in XSS array", String::from_utf8_lossy(token))
                    })?;
                    values.push(value);
                }
            }
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;
    Ok(batches.concat())
}
