use std::sync::Arc;

use crate::distributions::{
    AngularDistribution, DistributionError, EnergyDependentAngularDistribution,
    EquiprobableBinsAngularDistribution, IsotropicAngularDistribution, TabulatedAngularDistribution,
    TwoTableSampling,
};
use crate::scattering::errors::invalid_distribution;
use crate::scattering::record::Record;
use crate::scattering::ScatteringError;

// Number of cosines bounding the 32 equiprobable bins
const EQUIPROBABLE_COSINES: usize = 33;

// Build the angular distribution of a reaction from its AND record:
// NE, E(NE), LC(NE), followed by the tables LC points to
pub fn create_distribution(
    and_sub_array: &[f64],
    start_index: usize,
    table: &str,
    mt: u32,
    sampling: TwoTableSampling,
) -> Result<EnergyDependentAngularDistribution, ScatteringError> {
    let invalid = invalid_distribution(table, mt);
    let record = Record::new(and_sub_array, start_index);

    let num_energies = record.count(0, "AND incident energies").map_err(&invalid)?;
    let energy = record.slice(1, num_energies, "AND incident energies").map_err(&invalid)?;
    let locators = record.slice(1 + num_energies, num_energies, "AND locators").map_err(&invalid)?;

    if energy.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(ScatteringError::UnsortedEnergyGrid { table: table.to_string(), mt });
    }

    let distributions = locators.iter()
        .map(|&locator| create_cosine_distribution(&record, locator))
        .collect::<Result<Vec<_>, _>>()
        .map_err(&invalid)?;

    EnergyDependentAngularDistribution::new(energy.to_vec(), distributions, sampling).map_err(&invalid)
}

fn create_cosine_distribution(record: &Record, locator: f64) -> Result<AngularDistribution, DistributionError> {
    let locator = crate::utils::xss_int(locator);
    match locator {
        0 => Ok(AngularDistribution::Isotropic(IsotropicAngularDistribution)),
        // 32 equiprobable cosine bins
        locator if locator > 0 => {
            let index = record.locate(locator, "AND equiprobable bins")?;
            let cosines = record.slice(index, EQUIPROBABLE_COSINES, "AND equiprobable bins")?;
            Ok(AngularDistribution::EquiprobableBins(EquiprobableBinsAngularDistribution::new(cosines.to_vec())?))
        },
        // Tabulated JJ, NP, cosines, PDF, CDF
        locator => {
            let index = record.locate(-locator, "AND tabulated distribution")?;
            Ok(AngularDistribution::Tabulated(read_tabulated_cosines(record, index)?))
        },
    }
}

// JJ, NP, mu(NP), PDF(NP), CDF(NP) starting at `index`. Shared with the
// correlated energy-angle law.
pub(crate) fn read_tabulated_cosines(record: &Record, index: usize) -> Result<TabulatedAngularDistribution, DistributionError> {
    let interpolation_flag = record.int(index, "tabulated cosine interpolation")?;
    let num_points = record.count(index + 1, "tabulated cosine points")?;
    let cosines = record.slice(index + 2, num_points, "tabulated cosines")?;
    let pdf = record.slice(index + 2 + num_points, num_points, "tabulated cosine PDF")?;
    let cdf = record.slice(index + 2 + 2 * num_points, num_points, "tabulated cosine CDF")?;
    TabulatedAngularDistribution::new(interpolation_flag, cosines.to_vec(), pdf.to_vec(), cdf.to_vec())
}

// Every isotropic reaction shares the same distribution
pub fn create_isotropic_distribution() -> Arc<EnergyDependentAngularDistribution> {
    EnergyDependentAngularDistribution::isotropic()
}
