use std::io::{BufReader, Read};

use anyhow::{Context, Result};

use crate::utils;

//=====================================================================
// Support for the headers of ACE files. These contain high-level
// information on the isotope including the ZAID, SZAID, atomic weight
// ratio, and temperature.
//
// See the ACE Format specification for a description of the possible
// ACE header formats (>2.0.0 and legacy).
//=====================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub zaid: String,
    pub szaid: Option<String>,
    pub atomic_weight_ratio: f64,
    pub kT: f64,
    pub temperature: f64,
}

impl Header {
    // The header is not a fixed size, so it is read line by line. The
    // reader is left at the start of the IZAW array.
    pub fn from_ACE<R: Read>(reader: &mut BufReader<R>) -> Result<Self> {
        // Pull first two lines
        let header = utils::read_lines(reader, 2)?;

        if header[0].contains("2.0.") {
            Self::from_2_0_header(reader, &header)
        } else {
            Self::from_legacy_header(&header[0])
        }
    }

    // VERS SZAID SOURCE
    // AWR TEMP DATE N
    // followed by N comment lines
    fn from_2_0_header<R: Read>(reader: &mut BufReader<R>, header: &[String]) -> Result<Self> {
        let szaid = header[0]
            .split_whitespace()
            .nth(1)
            .map(|s| s.to_string())
            .context("2.0.x ACE header is missing the SZAID")?;

        let second_line: Vec<&str> = header[1].split_whitespace().collect();
        if second_line.len() < 4 {
            anyhow::bail!("Malformed second line of 2.0.x ACE header: '{}'", header[1]);
        }
        let atomic_weight_ratio: f64 = second_line[0].parse()
            .with_context(|| format!("Invalid atomic weight ratio '{}'", second_line[0]))?;
        let kT: f64 = second_line[1].parse()
            .with_context(|| format!("Invalid temperature '{}'", second_line[1]))?;
        let num_comments: usize = second_line[3].parse()
            .with_context(|| format!("Invalid comment line count '{}'", second_line[3]))?;

        // Tables converted from the legacy format keep the legacy header
        // as the first comment, use its ZAID when it is there
        let comments = utils::read_lines(reader, num_comments)?;
        let zaid = comments
            .first()
            .and_then(|line| Self::from_legacy_header(line).ok())
            .map(|legacy| legacy.zaid)
            .unwrap_or_else(|| szaid.clone());

        Ok(Self {
            zaid,
            szaid: Some(szaid),
            atomic_weight_ratio,
            kT,
            temperature: utils::compute_temperature_from_kT(kT),
        })
    }

    // HZ AW0 TZ HD
    // HK HM
    fn from_legacy_header(line: &str) -> Result<Self> {
        let split_legacy_header: Vec<&str> = line.split_whitespace().collect();
        if split_legacy_header.len() < 3 {
            anyhow::bail!("Malformed legacy ACE header: '{}'", line);
        }
        let zaid = split_legacy_header[0].to_string();
        let atomic_weight_ratio: f64 = split_legacy_header[1].parse()
            .with_context(|| format!("Invalid atomic weight ratio '{}'", split_legacy_header[1]))?;
        let kT: f64 = split_legacy_header[2].parse()
            .with_context(|| format!("Invalid temperature '{}'", split_legacy_header[2]))?;
        let temperature = utils::compute_temperature_from_kT(kT);

        Ok(Self { zaid, szaid: None, atomic_weight_ratio, kT, temperature })
    }

    // Name used to refer to the table in messages, SZAID if we have one
    pub fn table_name(&self) -> &str {
        self.szaid.as_deref().unwrap_or(&self.zaid)
    }
}
