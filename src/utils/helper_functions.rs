use std::io::{BufRead, BufReader, Read};

use anyhow::Result;

//====================================================================
// Assorted helper functions.
//====================================================================

// Read a specified number of lines from a BufReader
#[inline]
pub fn read_lines<R: Read>(reader: &mut BufReader<R>, num_lines: usize) -> Result<Vec<String>> {
    let lines = reader.lines()
        .take(num_lines)
        .map(|line| line.map_err(anyhow::Error::from))
        .collect::<Result<Vec<_>>>()?;
    if lines.len() != num_lines {
        anyhow::bail!("Expected {} lines but the file ended after {}", num_lines, lines.len());
    }
    Ok(lines)
}

// Provided a temperature in MeV, convert to K
#[inline]
pub fn compute_temperature_from_kT(kT: f64) -> f64 {
    kT * 1e6 / 8.617333262e-5
}

// Every value in XSS is stored as a double, including integer flags,
// counts and locators. Recover the integer.
#[inline(always)]
pub fn xss_int(value: f64) -> i64 {
    value.round() as i64
}

// Same as xss_int, for values which are counts. Negative counts are
// treated as empty.
#[inline(always)]
pub fn xss_count(value: f64) -> usize {
    xss_int(value).max(0) as usize
}

#[cfg(test)]
mod tests {
    use std::io::{Seek, Write};

    use tempfile::tempfile;

    use super::*;

    #[test]
    fn test_compute_temperature_from_kT() {
        let kT = 8.617333262e-8;
        let expected_temperature = 1000.0; // Kelvin
        assert!((compute_temperature_from_kT(kT) - expected_temperature).abs() < 1e-9);
    }

    #[test]
    fn test_xss_int() {
        assert_eq!(xss_int(3.0), 3);
        assert_eq!(xss_int(-1.0), -1);
        assert_eq!(xss_int(43.999999999), 44);
        assert_eq!(xss_count(-4.0), 0);
        assert_eq!(xss_count(12.0), 12);
    }

    #[test]
    fn test_read_lines() {
        let mut file = tempfile().unwrap();
        writeln!(file, "first\nsecond\nthird").unwrap();
        file.seek(std::io::SeekFrom::Start(0)).unwrap();
        let mut reader = BufReader::new(file);

        assert_eq!(read_lines(&mut reader, 2).unwrap(), vec!["first", "second"]);
        assert!(read_lines(&mut reader, 2).is_err());
    }
}
