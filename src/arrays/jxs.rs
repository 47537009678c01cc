use std::ops::{Deref, DerefMut};

use crate::arrays::BlockId;

// Number of entries stored in the JXS array of an ACE table
pub const JXS_LEN: usize = 32;

//=====================================================================
// Represents the complete JXS array from an ACE file. This array
// contains the (1-based) starting indices of all data blocks in the
// XSS array. If a block is not present, the starting index is 0.
//
// Extractors keep their own copy so derived or fixed-up offsets can
// be written without touching the caller's data.
//=====================================================================
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JxsArray ( pub [i64; JXS_LEN] );

impl Deref for JxsArray {
    type Target = [i64; JXS_LEN];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JxsArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl JxsArray {
    pub fn from_slice(values: &[i64]) -> Self {
        assert_eq!(
            values.len(),
            JXS_LEN,
            "JXS array must contain exactly {} entries, found {}",
            JXS_LEN,
            values.len()
        );
        let mut jxs = [0; JXS_LEN];
        jxs.copy_from_slice(values);
        Self(jxs)
    }

    // Raw stored locator for a block (1-based, 0 if absent)
    #[inline]
    pub fn get(&self, block: BlockId) -> i64 {
        self.0[block.jxs_index()]
    }

    #[inline]
    pub fn insert(&mut self, block: BlockId, value: i64) {
        self.0[block.jxs_index()] = value;
    }

    // Starting index of a block in the XSS array, converted to 0-based.
    // None if the block is absent.
    #[inline]
    pub fn start_index(&self, block: BlockId) -> Option<usize> {
        fortran_to_index(self.get(block))
    }
}

// All locators stored in ACE tables (JXS, LAND, LDLW, LC, ...) are
// 1-based. This is the one place where they become array indices.
// Non-positive locators mean "no data" and map to None.
#[inline]
pub fn fortran_to_index(locator: i64) -> Option<usize> {
    if locator > 0 {
        Some((locator - 1) as usize)
    } else {
        None
    }
}
