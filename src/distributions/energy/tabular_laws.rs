use rand::Rng;

use crate::distributions::{DistributionError, SamplingError, TabularDistribution, TabularSample};
use crate::unitf64::UnitF64;

// Locate an incident energy on a grid. Returns the lower index of the
// bracketing bin and the interpolation factor within it. Energies off
// the grid use the first or last bin with a factor of 0 or 1.
fn incident_energy_bin(grid: &[f64], energy: f64) -> (usize, f64) {
    let n = grid.len();
    if n < 2 || energy <= grid[0] {
        return (0, 0.0);
    }
    if energy >= grid[n - 1] {
        return (n - 2, 1.0);
    }
    let lower = grid.partition_point(|&e| e <= energy) - 1;
    let width = grid[lower + 1] - grid[lower];
    let factor = if width > 0.0 { (energy - grid[lower]) / width } else { 0.0 };
    (lower, factor)
}

fn check_incident_grid(energy: &[f64], num_tables: usize, what: &'static str) -> Result<(), DistributionError> {
    if energy.is_empty() {
        return Err(DistributionError::TooFewPoints { what, minimum: 1, found: 0 });
    }
    if energy.len() != num_tables {
        return Err(DistributionError::LengthMismatch { what, expected: energy.len(), found: num_tables });
    }
    if energy.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(DistributionError::UnsortedGrid { what });
    }
    Ok(())
}

//=====================================================================
// Outgoing energy tables for a set of incident energies, shared by the
// continuous tabular law (4) and the coupled laws (44 and 61).
//
// Sampling uses unit-base scaled interpolation: a table is picked
// with probability given by the position of the incident energy in its
// bin, and the continuous part of the sample is rescaled to the
// interpolated energy bounds of the two neighbouring tables.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEnergyTables {
    incident_energy: Vec<f64>,
    tables: Vec<TabularDistribution>,
}

// Result of sampling the outgoing energy tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutgoingEnergySample {
    // Outgoing energy after scaling
    pub energy: f64,
    // Index of the incident energy table that was sampled
    pub table: usize,
    // Raw sample from that table
    pub sample: TabularSample,
}

impl OutgoingEnergyTables {
    pub fn new(incident_energy: Vec<f64>, tables: Vec<TabularDistribution>) -> Result<Self, DistributionError> {
        check_incident_grid(&incident_energy, tables.len(), "outgoing energy tables")?;
        Ok(Self { incident_energy, tables })
    }

    pub fn incident_energy(&self) -> &[f64] {
        &self.incident_energy
    }

    pub fn tables(&self) -> &[TabularDistribution] {
        &self.tables
    }

    pub fn sample<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> OutgoingEnergySample {
        if self.tables.len() == 1 {
            let sample = self.tables[0].sample(UnitF64::sample(rng).0);
            return OutgoingEnergySample { energy: sample.value, table: 0, sample };
        }

        let (lower, factor) = incident_energy_bin(&self.incident_energy, energy);
        let table = if factor > UnitF64::sample(rng).0 { lower + 1 } else { lower };
        let sample = self.tables[table].sample(UnitF64::sample(rng).0);

        // Discrete lines are not scaled
        if self.tables[table].is_discrete_bin(sample.bin) {
            return OutgoingEnergySample { energy: sample.value, table, sample };
        }

        let (lower_first, lower_last) = self.tables[lower].continuous_bounds();
        let (upper_first, upper_last) = self.tables[lower + 1].continuous_bounds();
        let first = lower_first + factor * (upper_first - lower_first);
        let last = lower_last + factor * (upper_last - lower_last);

        let (table_first, table_last) = self.tables[table].continuous_bounds();
        let energy = if table_last > table_first {
            first + (sample.value - table_first) * (last - first) / (table_last - table_first)
        } else {
            first
        };

        OutgoingEnergySample { energy, table, sample }
    }
}

//=====================================================================
// ACE law 1, tabular equiprobable energy bins
//
// Every incident energy carries NET outgoing energies bounding NET - 1
// equally probable bins.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct EquiprobableBinsEnergyDistribution {
    incident_energy: Vec<f64>,
    outgoing_energy: Vec<Vec<f64>>,
}

impl EquiprobableBinsEnergyDistribution {
    pub fn new(incident_energy: Vec<f64>, outgoing_energy: Vec<Vec<f64>>) -> Result<Self, DistributionError> {
        check_incident_grid(&incident_energy, outgoing_energy.len(), "equiprobable energy bins")?;
        let num_points = outgoing_energy[0].len();
        if num_points < 2 {
            return Err(DistributionError::TooFewPoints { what: "equiprobable energy bins", minimum: 2, found: num_points });
        }
        if let Some(bad) = outgoing_energy.iter().find(|bins| bins.len() != num_points) {
            return Err(DistributionError::LengthMismatch { what: "equiprobable energy bins", expected: num_points, found: bad.len() });
        }
        Ok(Self { incident_energy, outgoing_energy })
    }

    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> f64 {
        let (lower, factor) = incident_energy_bin(&self.incident_energy, energy);
        let upper = (lower + 1).min(self.outgoing_energy.len() - 1);

        let num_bins = self.outgoing_energy[0].len() - 1;
        let position = UnitF64::sample(rng).0 * num_bins as f64;
        let bin = (position.floor() as usize).min(num_bins - 1);
        let fraction = position - bin as f64;

        let edge = |k: usize| {
            let low = self.outgoing_energy[lower][k];
            low + factor * (self.outgoing_energy[upper][k] - low)
        };
        let (left, right) = (edge(bin), edge(bin + 1));
        left + fraction * (right - left)
    }
}

//=====================================================================
// ACE law 4, continuous tabular distribution
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousTabularEnergyDistribution ( pub OutgoingEnergyTables );

impl ContinuousTabularEnergyDistribution {
    pub fn sample_energy<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<f64, SamplingError> {
        Ok(self.0.sample(energy, rng).energy.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::distributions::TabularInterpolation;
    use crate::utils::MockRng;

    fn histogram(x: Vec<f64>) -> TabularDistribution {
        let width = x[x.len() - 1] - x[0];
        let pdf = vec![1.0 / width; x.len()];
        let cdf = x.iter().map(|v| (v - x[0]) / width).collect();
        TabularDistribution::new(TabularInterpolation::Histogram, 0, x, pdf, cdf).unwrap()
    }

    #[test]
    fn test_incident_energy_bin() {
        let grid = [1.0, 2.0, 4.0];
        assert_eq!(incident_energy_bin(&grid, 0.5), (0, 0.0));
        assert_eq!(incident_energy_bin(&grid, 1.0), (0, 0.0));
        assert_eq!(incident_energy_bin(&grid, 3.0), (1, 0.5));
        assert_eq!(incident_energy_bin(&grid, 4.0), (1, 1.0));
        assert_eq!(incident_energy_bin(&grid, 9.0), (1, 1.0));
        assert_eq!(incident_energy_bin(&[1.0], 9.0), (0, 0.0));
    }

    #[test]
    fn test_scaled_interpolation() {
        // Uniform on [0, 1] at E = 1 and on [2, 4] at E = 3
        let tables = OutgoingEnergyTables::new(
            vec![1.0, 3.0],
            vec![histogram(vec![0.0, 1.0]), histogram(vec![2.0, 4.0])],
        ).unwrap();

        // Halfway in energy, the lower table is chosen (0.75 > 0.5), its
        // midpoint maps onto the midpoint of the interpolated bounds [1, 2.5]
        let mut rng = MockRng::new(vec![0.75, 0.5]);
        let sample = tables.sample(2.0, &mut rng);
        assert_eq!(sample.table, 0);
        assert_abs_diff_eq!(sample.sample.value, 0.5);
        assert_abs_diff_eq!(sample.energy, 1.75);

        // Upper table, start of its range maps to the lower bound
        let mut rng = MockRng::new(vec![0.25, 0.0]);
        let sample = tables.sample(2.0, &mut rng);
        assert_eq!(sample.table, 1);
        assert_abs_diff_eq!(sample.energy, 1.0);
    }

    #[test]
    fn test_discrete_lines_are_not_scaled() {
        let line = TabularDistribution::new(
            TabularInterpolation::Histogram, 1, vec![0.7], vec![1.0], vec![1.0],
        ).unwrap();
        let tables = OutgoingEnergyTables::new(vec![1.0, 3.0], vec![line.clone(), line]).unwrap();
        let mut rng = MockRng::new(vec![0.5, 0.5]);
        assert_eq!(tables.sample(2.0, &mut rng).energy, 0.7);
    }

    #[test]
    fn test_law1_equiprobable_bins() {
        let distribution = EquiprobableBinsEnergyDistribution::new(
            vec![1.0, 3.0],
            vec![vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]],
        ).unwrap();
        // On the first table, xi = 0.75 lands halfway into the second bin
        let mut rng = MockRng::new(vec![0.75]);
        assert_abs_diff_eq!(distribution.sample_energy(1.0, &mut rng), 1.5);
        // Halfway between tables the bin edges are [0, 1.5, 3]
        let mut rng = MockRng::new(vec![0.75]);
        assert_abs_diff_eq!(distribution.sample_energy(2.0, &mut rng), 2.25);
        // Above the grid the last table is used
        let mut rng = MockRng::new(vec![0.5]);
        assert_abs_diff_eq!(distribution.sample_energy(10.0, &mut rng), 2.0);
    }

    #[test]
    fn test_law1_rejects_ragged_bins() {
        assert!(EquiprobableBinsEnergyDistribution::new(
            vec![1.0, 3.0],
            vec![vec![0.0, 1.0, 2.0], vec![0.0, 2.0]],
        ).is_err());
        assert!(EquiprobableBinsEnergyDistribution::new(vec![1.0], vec![vec![0.0]]).is_err());
    }

    #[test]
    fn test_law4_single_table() {
        let distribution = ContinuousTabularEnergyDistribution(
            OutgoingEnergyTables::new(vec![1.0], vec![histogram(vec![0.0, 2.0])]).unwrap()
        );
        let mut rng = MockRng::new(vec![0.25]);
        assert_abs_diff_eq!(distribution.sample_energy(5.0, &mut rng).unwrap(), 0.5);
        assert_eq!(rng.consumed(), 1);
    }
}
