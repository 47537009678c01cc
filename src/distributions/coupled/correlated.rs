use rand::Rng;

use crate::distributions::{
    AngularDistribution, DistributionError, EnergyAngleSample, FrameOfReference, OutgoingEnergyTables,
    SampleAngle, SamplingError, TabularInterpolation,
};
use crate::unitf64::UnitF64;

//=====================================================================
// ACE law 61, correlated energy-angle distribution
//
// Every outgoing energy point of every incident energy table carries
// its own angular distribution (isotropic when LC = 0).
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct Law61Distribution {
    tables: OutgoingEnergyTables,
    angular: Vec<Vec<AngularDistribution>>,
    frame: FrameOfReference,
    atomic_weight_ratio: f64,
}

impl Law61Distribution {
    pub fn new(
        tables: OutgoingEnergyTables,
        angular: Vec<Vec<AngularDistribution>>,
        frame: FrameOfReference,
        atomic_weight_ratio: f64,
    ) -> Result<Self, DistributionError> {
        if angular.len() != tables.tables().len() {
            return Err(DistributionError::LengthMismatch {
                what: "correlated angular tables",
                expected: tables.tables().len(),
                found: angular.len(),
            });
        }
        for (table, cosines) in tables.tables().iter().zip(angular.iter()) {
            if cosines.len() != table.x().len() {
                return Err(DistributionError::LengthMismatch {
                    what: "correlated angular distributions",
                    expected: table.x().len(),
                    found: cosines.len(),
                });
            }
        }
        Ok(Self { tables, angular, frame, atomic_weight_ratio })
    }

    pub fn tables(&self) -> &OutgoingEnergyTables {
        &self.tables
    }

    pub fn angular(&self) -> &[Vec<AngularDistribution>] {
        &self.angular
    }

    pub fn frame(&self) -> FrameOfReference {
        self.frame
    }

    pub fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    pub fn sample<R: Rng + ?Sized>(&self, energy: f64, rng: &mut R) -> Result<EnergyAngleSample, SamplingError> {
        let outgoing = self.tables.sample(energy, rng);
        let table = &self.tables.tables()[outgoing.table];

        // Histogram data uses the angular distribution of the bin, lin-lin
        // the one of the closest outgoing energy point
        let mut k = outgoing.sample.bin;
        if table.interpolation() == TabularInterpolation::LinLin
            && !table.is_discrete_bin(k)
            && outgoing.sample.cdf_fraction > 0.5
            && k + 1 < table.x().len()
        {
            k += 1;
        }

        let cos_theta = self.angular[outgoing.table][k].sample_cos_theta(UnitF64::sample(rng))?;
        Ok(EnergyAngleSample { energy: outgoing.energy.max(0.0), cos_theta: cos_theta.clamp(-1.0, 1.0) })
    }
}
