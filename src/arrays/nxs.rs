use std::ops::Deref;

use strum_macros::{Display, EnumIter};

// Number of entries stored in the NXS array of an ACE table
pub const NXS_LEN: usize = 16;

//=====================================================================
// Named entries of the NXS array. The NXS array contains the counters
// needed to interpret the structure of the main XSS data array.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum NxsId {
    XssLength = 0, // Number of entries in XSS array
    Za = 1,        // ZA of isotope
    Nes = 2,       // Number of energies
    Ntr = 3,       // Number of reactions excluding elastic scattering
    Nr = 4,        // Number of reactions having secondary neutrons excluding elastic scattering
    Ntrp = 5,      // Number of photon production reactions
    Ntype = 6,     // Number of particle types for which production data is given
    Npcr = 7,      // Number of delayed neutron precursor families
    S = 8,         // Excited state (>2.0.0 Header only)
    Z = 9,         // Atomic number (>2.0.0 Header only)
    A = 10,        // Atomic mass number (>2.0.0 Header only)
}

impl NxsId {
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

//=====================================================================
// Represents the NXS array from an ACE file.
//=====================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NxsArray ( pub [i64; NXS_LEN] );

impl Deref for NxsArray {
    type Target = [i64; NXS_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl NxsArray {
    // Copy the NXS values out of a caller owned slice. A slice of the
    // wrong length means the table was read incorrectly.
    pub fn from_slice(values: &[i64]) -> Self {
        assert_eq!(
            values.len(),
            NXS_LEN,
            "NXS array must contain exactly {} entries, found {}",
            NXS_LEN,
            values.len()
        );
        let mut nxs = [0; NXS_LEN];
        nxs.copy_from_slice(values);
        Self(nxs)
    }

    #[inline]
    pub fn get(&self, id: NxsId) -> i64 {
        self.0[id.index()]
    }

    // Counters are never negative in a valid table, treat anything below
    // zero as "nothing there".
    #[inline]
    pub fn count(&self, id: NxsId) -> usize {
        self.get(id).max(0) as usize
    }

    pub fn xss_len(&self) -> usize { self.count(NxsId::XssLength) }
    pub fn za(&self) -> usize { self.count(NxsId::Za) }
    pub fn nes(&self) -> usize { self.count(NxsId::Nes) }
    pub fn ntr(&self) -> usize { self.count(NxsId::Ntr) }
    pub fn nr(&self) -> usize { self.count(NxsId::Nr) }
    pub fn ntrp(&self) -> usize { self.count(NxsId::Ntrp) }
    pub fn ntype(&self) -> usize { self.count(NxsId::Ntype) }
    pub fn npcr(&self) -> usize { self.count(NxsId::Npcr) }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_counters() {
        let mut values = [0; NXS_LEN];
        values[0] = 1200;
        values[1] = 8016;
        values[2] = 3;
        values[3] = 5;
        values[4] = 4;
        values[7] = -2;
        let nxs = NxsArray::from_slice(&values);

        assert_eq!(nxs.xss_len(), 1200);
        assert_eq!(nxs.za(), 8016);
        assert_eq!(nxs.nes(), 3);
        assert_eq!(nxs.ntr(), 5);
        assert_eq!(nxs.nr(), 4);
        assert_eq!(nxs.ntrp(), 0);
        // Negative counters are clamped, the raw value is untouched
        assert_eq!(nxs.npcr(), 0);
        assert_eq!(nxs.get(NxsId::Npcr), -2);
    }

    #[test]
    #[should_panic(expected = "NXS array must contain exactly 16 entries")]
    fn test_wrong_length() {
        NxsArray::from_slice(&[0; 9]);
    }

    #[test]
    fn test_index_order() {
        for (i, id) in NxsId::iter().enumerate() {
            assert_eq!(id.index(), i);
        }
        assert_eq!(format!("{}", NxsId::Nes), "Nes");
    }
}
