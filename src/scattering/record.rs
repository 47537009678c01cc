use crate::arrays::fortran_to_index;
use crate::distributions::DistributionError;
use crate::utils::{xss_count, xss_int};

//=====================================================================
// Bounds checked reads from the AND or DLW data of a single reaction.
//
// Locators stored in the data are 1-based and relative to the start of
// the whole block, while the record only holds the reaction's own
// slice, which begins at `start_index` (0-based) within the block.
//=====================================================================
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'a> {
    data: &'a [f64],
    start_index: usize,
}

impl<'a> Record<'a> {
    pub(crate) fn new(data: &'a [f64], start_index: usize) -> Self {
        Self { data, start_index }
    }

    pub(crate) fn data(&self) -> &'a [f64] {
        self.data
    }

    pub(crate) fn value(&self, index: usize, what: &'static str) -> Result<f64, DistributionError> {
        self.data.get(index).copied().ok_or(DistributionError::Truncated {
            what,
            needed: index + 1,
            available: self.data.len(),
        })
    }

    pub(crate) fn int(&self, index: usize, what: &'static str) -> Result<i64, DistributionError> {
        Ok(xss_int(self.value(index, what)?))
    }

    pub(crate) fn count(&self, index: usize, what: &'static str) -> Result<usize, DistributionError> {
        Ok(xss_count(self.value(index, what)?))
    }

    pub(crate) fn slice(&self, index: usize, length: usize, what: &'static str) -> Result<&'a [f64], DistributionError> {
        self.data.get(index..index + length).ok_or(DistributionError::Truncated {
            what,
            needed: index + length,
            available: self.data.len(),
        })
    }

    // Turn a block relative locator into an index into this record
    pub(crate) fn locate(&self, locator: i64, what: &'static str) -> Result<usize, DistributionError> {
        fortran_to_index(locator)
            .and_then(|index| index.checked_sub(self.start_index))
            .filter(|&index| index < self.data.len())
            .ok_or(DistributionError::Truncated {
                what,
                needed: (locator.max(0) as usize).saturating_sub(self.start_index),
                available: self.data.len(),
            })
    }
}
