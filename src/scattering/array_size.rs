use crate::utils::xss_int;

// Compute the length of every reaction's record in a data block (AND,
// DLW, ...) from the locator block pointing into it. Records are
// contiguous, so a record runs up to the next larger locator, the last
// one up to the end of the data block. Non-positive locators have no
// record.
pub fn calculate_dist_array_sizes(locators: &[f64], data: &[f64]) -> Vec<usize> {
    let mut starts: Vec<i64> = locators.iter()
        .map(|&locator| xss_int(locator))
        .filter(|&locator| locator > 0)
        .collect();
    starts.sort_unstable();
    starts.dedup();

    locators.iter()
        .map(|&locator| {
            let locator = xss_int(locator);
            if locator <= 0 {
                return 0;
            }
            let start = (locator - 1) as usize;
            let next = starts.partition_point(|&other| other <= locator);
            let end = match starts.get(next) {
                Some(&next_locator) => (next_locator - 1) as usize,
                None => data.len(),
            };
            end.saturating_sub(start)
        })
        .collect()
}
