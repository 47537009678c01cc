use crate::distributions::{
    AceLaw, AngularDistribution, ContinuousTabularEnergyDistribution, DiscretePhotonEnergyDistribution,
    DistributionError, EnergyDistribution, EquiprobableBinsEnergyDistribution, EvaporationSpectrum,
    FrameOfReference, GeneralEvaporationSpectrum, IsotropicAngularDistribution, Law44Distribution,
    Law61Distribution, LevelScatteringDistribution, MaxwellFissionSpectrum, OutgoingEnergyTables,
    TabularDistribution, TabularInterpolation, WattSpectrum,
};
use crate::interpolation::InterpolationTable;
use crate::scattering::angular_factory::read_tabulated_cosines;
use crate::scattering::errors::invalid_distribution;
use crate::scattering::record::Record;
use crate::scattering::ScatteringError;

//=====================================================================
// Builds energy distributions from the DLW record of a reaction.
//
// A record starts with the law header
//   LNW, LAW, IDAT, NR, NBT(NR), INT(NR), NE, E(NE), P(NE)
// where IDAT locates the law data (LDAT) within the DLW block.
//=====================================================================

// Law data of one reaction, with the table and MT# to report errors against
struct LawData<'a> {
    record: Record<'a>,
    ldat: usize,
    law: i64,
    table: &'a str,
    mt: u32,
}

impl<'a> LawData<'a> {
    fn read(dlw_sub_array: &'a [f64], start_index: usize, table: &'a str, mt: u32) -> Result<Self, ScatteringError> {
        let record = Record::new(dlw_sub_array, start_index);
        let invalid = invalid_distribution(table, mt);

        if record.int(0, "DLW LNW").map_err(&invalid)? != 0 {
            return Err(ScatteringError::MultipleLaws { table: table.to_string(), mt });
        }
        let law = record.int(1, "DLW LAW").map_err(&invalid)?;
        let idat = record.int(2, "DLW IDAT").map_err(&invalid)?;
        let ldat = record.locate(idat, "DLW law data").map_err(&invalid)?;
        Ok(Self { record, ldat, law, table, mt })
    }

    fn fail(&self, source: DistributionError) -> ScatteringError {
        invalid_distribution(self.table, self.mt)(source)
    }

    fn value(&self, offset: usize, what: &'static str) -> Result<f64, ScatteringError> {
        self.record.value(self.ldat + offset, what).map_err(|e| self.fail(e))
    }

    fn count(&self, offset: usize, what: &'static str) -> Result<usize, ScatteringError> {
        self.record.count(self.ldat + offset, what).map_err(|e| self.fail(e))
    }

    fn slice(&self, offset: usize, length: usize, what: &'static str) -> Result<&'a [f64], ScatteringError> {
        self.record.slice(self.ldat + offset, length, what).map_err(|e| self.fail(e))
    }

    // ENDF interpolation table at `offset` into LDAT, returned with the
    // number of entries it spans
    fn interpolation_table(&self, offset: usize) -> Result<(InterpolationTable, usize), ScatteringError> {
        let start = self.ldat + offset;
        let data = self.record.data();
        let length = InterpolationTable::get_table_length(start, data).map_err(|e| self.fail(e.into()))?;
        let table = InterpolationTable::process(&data[start..start + length]).map_err(|e| self.fail(e.into()))?;
        Ok((table, length))
    }

    fn check_single_region(&self, regions: i64) -> Result<(), ScatteringError> {
        if regions != 0 {
            return Err(ScatteringError::MultipleInterpolationRegions {
                table: self.table.to_string(),
                mt: self.mt,
                law: self.law,
                regions,
            });
        }
        Ok(())
    }

    fn check_sorted(&self, energy: &[f64]) -> Result<(), ScatteringError> {
        if energy.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ScatteringError::UnsortedEnergyGrid { table: self.table.to_string(), mt: self.mt });
        }
        Ok(())
    }

    // NR, NE, E(NE), L(NE) for the tabular laws 4, 44 and 61
    fn incident_tables(&self) -> Result<(&'a [f64], &'a [f64]), ScatteringError> {
        self.check_single_region(crate::utils::xss_int(self.value(0, "incident energy regions")?))?;
        let num_energies = self.count(1, "incident energies")?;
        let energy = self.slice(2, num_energies, "incident energies")?;
        let locators = self.slice(2 + num_energies, num_energies, "outgoing energy locators")?;
        self.check_sorted(energy)?;
        Ok((energy, locators))
    }

    // Split an INTT flag into the interpolation of the continuous part and
    // the number of discrete lines in front of it
    fn outgoing_interpolation(
        &self,
        intt: i64,
        num_points: usize,
        coupled: bool,
    ) -> Result<(TabularInterpolation, usize), ScatteringError> {
        let unsupported = || ScatteringError::UnsupportedInterpolation { table: self.table.to_string(), mt: self.mt, flag: intt };
        if coupled && intt > 10 {
            return Err(ScatteringError::DiscreteLinesInCoupledData { table: self.table.to_string(), mt: self.mt, flag: intt });
        }
        let (flag, num_discrete) = if !coupled && intt >= 10 { (intt % 10, (intt / 10) as usize) } else { (intt, 0) };
        // Only discrete lines, the interpolation of the continuous part is unused
        if num_discrete > 0 && num_discrete == num_points {
            return Ok((TabularInterpolation::Histogram, num_discrete));
        }
        let interpolation = TabularInterpolation::from_flag(flag, "outgoing energy table").map_err(|_| unsupported())?;
        Ok((interpolation, num_discrete))
    }

    // INTT, NP, E'(NP), PDF(NP), CDF(NP) at the block relative `locator`.
    // Returns the table with the record index just past its CDF.
    fn outgoing_table(&self, locator: f64, coupled: bool) -> Result<(TabularDistribution, usize), ScatteringError> {
        let fail = |e: DistributionError| self.fail(e);
        let index = self.record.locate(crate::utils::xss_int(locator), "outgoing energy table").map_err(fail)?;
        let intt = self.record.int(index, "outgoing energy interpolation").map_err(fail)?;
        let num_points = self.record.count(index + 1, "outgoing energy points").map_err(fail)?;
        let (interpolation, num_discrete) = self.outgoing_interpolation(intt, num_points, coupled)?;

        let energy = self.record.slice(index + 2, num_points, "outgoing energies").map_err(fail)?;
        let pdf = self.record.slice(index + 2 + num_points, num_points, "outgoing energy PDF").map_err(fail)?;
        let cdf = self.record.slice(index + 2 + 2 * num_points, num_points, "outgoing energy CDF").map_err(fail)?;
        let table = TabularDistribution::new(interpolation, num_discrete, energy.to_vec(), pdf.to_vec(), cdf.to_vec())
            .map_err(fail)?;
        Ok((table, index + 2 + 3 * num_points))
    }

    fn outgoing_energy_tables<T>(
        &self,
        coupled: bool,
        mut extra: impl FnMut(&TabularDistribution, usize) -> Result<T, ScatteringError>,
    ) -> Result<(OutgoingEnergyTables, Vec<T>), ScatteringError> {
        let (energy, locators) = self.incident_tables()?;
        let mut tables = Vec::with_capacity(locators.len());
        let mut extras = Vec::with_capacity(locators.len());
        for &locator in locators {
            let (table, next) = self.outgoing_table(locator, coupled)?;
            extras.push(extra(&table, next)?);
            tables.push(table);
        }
        let tables = OutgoingEnergyTables::new(energy.to_vec(), tables).map_err(|e| self.fail(e))?;
        Ok((tables, extras))
    }
}

// Build the energy distribution of a reaction whose angle is sampled
// separately
pub fn create_distribution(
    dlw_sub_array: &[f64],
    start_index: usize,
    table: &str,
    mt: u32,
    atomic_weight_ratio: f64,
) -> Result<EnergyDistribution, ScatteringError> {
    let data = LawData::read(dlw_sub_array, start_index, table, mt)?;
    let unsupported = || ScatteringError::UnsupportedLaw { table: table.to_string(), mt, law: data.law };
    let law = AceLaw::try_from(data.law).map_err(|_| unsupported())?;

    let distribution = match law {
        AceLaw::EquiprobableBins => EnergyDistribution::EquiprobableBins(create_law1(&data)?),
        AceLaw::DiscretePhoton => {
            let primary_flag = crate::utils::xss_int(data.value(0, "law 2 LP")?);
            let photon_energy = data.value(1, "law 2 EG")?;
            EnergyDistribution::DiscretePhoton(
                DiscretePhotonEnergyDistribution::new(primary_flag, photon_energy, atomic_weight_ratio)
                    .map_err(|e| data.fail(e))?,
            )
        },
        AceLaw::LevelScattering => {
            // Level scattering applies over the whole energy range
            let regions = data.record.int(3, "law 3 applicability regions").map_err(|e| data.fail(e))?;
            data.check_single_region(regions)?;
            EnergyDistribution::LevelScattering(LevelScatteringDistribution {
                threshold: data.value(0, "law 3 LDAT(1)")?,
                mass_ratio: data.value(1, "law 3 LDAT(2)")?,
            })
        },
        AceLaw::ContinuousTabular => {
            let (tables, _) = data.outgoing_energy_tables(false, |_, _| Ok(()))?;
            EnergyDistribution::ContinuousTabular(ContinuousTabularEnergyDistribution(tables))
        },
        AceLaw::GeneralEvaporation => {
            let (theta, length) = data.interpolation_table(0)?;
            let num_points = data.count(length, "law 5 NET")?;
            let x = data.slice(length + 1, num_points, "law 5 X")?;
            EnergyDistribution::GeneralEvaporation(
                GeneralEvaporationSpectrum::new(theta, x.to_vec()).map_err(|e| data.fail(e))?,
            )
        },
        AceLaw::MaxwellFission => {
            let (theta, length) = data.interpolation_table(0)?;
            let restriction_energy = data.value(length, "law 7 U")?;
            EnergyDistribution::MaxwellFission(MaxwellFissionSpectrum { theta, restriction_energy })
        },
        AceLaw::Evaporation => {
            let (theta, length) = data.interpolation_table(0)?;
            let restriction_energy = data.value(length, "law 9 U")?;
            EnergyDistribution::Evaporation(EvaporationSpectrum { theta, restriction_energy })
        },
        AceLaw::Watt => {
            let (a, a_length) = data.interpolation_table(0)?;
            let (b, b_length) = data.interpolation_table(a_length)?;
            let restriction_energy = data.value(a_length + b_length, "law 11 U")?;
            EnergyDistribution::Watt(WattSpectrum { a, b, restriction_energy })
        },
        // Coupled laws carry their own angles and have their own builders
        AceLaw::KalbachMann | AceLaw::CorrelatedEnergyAngle => return Err(unsupported()),
    };
    Ok(distribution)
}

// NR, NE, E(NE), NET, EOUT(NET, NE)
fn create_law1(data: &LawData) -> Result<EquiprobableBinsEnergyDistribution, ScatteringError> {
    data.check_single_region(crate::utils::xss_int(data.value(0, "law 1 NR")?))?;
    let num_energies = data.count(1, "law 1 NE")?;
    let energy = data.slice(2, num_energies, "law 1 incident energies")?;
    data.check_sorted(energy)?;
    let num_points = data.count(2 + num_energies, "law 1 NET")?;
    let outgoing = data.slice(3 + num_energies, num_energies * num_points, "law 1 outgoing energies")?;

    let outgoing_energy = outgoing.chunks(num_points.max(1)).map(|bins| bins.to_vec()).collect();
    EquiprobableBinsEnergyDistribution::new(energy.to_vec(), outgoing_energy).map_err(|e| data.fail(e))
}

// Peek at the law of a reaction whose angle is coupled to its energy
pub fn determine_coupled_distribution(dlw_sub_array: &[f64], table: &str, mt: u32) -> Result<AceLaw, ScatteringError> {
    let law = Record::new(dlw_sub_array, 0)
        .int(1, "DLW LAW")
        .map_err(invalid_distribution(table, mt))?;
    match AceLaw::try_from(law) {
        Ok(ace_law) if ace_law.is_coupled() => Ok(ace_law),
        _ => Err(ScatteringError::UnsupportedCoupledLaw { table: table.to_string(), mt, law }),
    }
}

// Kalbach-Mann systematics, every outgoing energy table is followed by
// the precompound fractions R(NP) and angular slopes A(NP)
pub fn create_ace_law44_distribution(
    dlw_sub_array: &[f64],
    start_index: usize,
    table: &str,
    mt: u32,
    frame: FrameOfReference,
    atomic_weight_ratio: f64,
) -> Result<Law44Distribution, ScatteringError> {
    let data = LawData::read(dlw_sub_array, start_index, table, mt)?;
    let (tables, parameters) = data.outgoing_energy_tables(true, |outgoing, next| {
        let num_points = outgoing.x().len();
        let r = data.record.slice(next, num_points, "Kalbach precompound fractions").map_err(|e| data.fail(e))?;
        let a = data.record.slice(next + num_points, num_points, "Kalbach angular slopes").map_err(|e| data.fail(e))?;
        Ok((r.to_vec(), a.to_vec()))
    })?;
    let (precompound_fraction, angular_slope): (Vec<_>, Vec<_>) = parameters.into_iter().unzip();
    Law44Distribution::new(tables, precompound_fraction, angular_slope, frame, atomic_weight_ratio)
        .map_err(|e| data.fail(e))
}

// Correlated energy-angle tables, every outgoing energy table is followed
// by LC(NP) locating a tabulated cosine distribution per outgoing energy
pub fn create_ace_law61_distribution(
    dlw_sub_array: &[f64],
    start_index: usize,
    table: &str,
    mt: u32,
    frame: FrameOfReference,
    atomic_weight_ratio: f64,
) -> Result<Law61Distribution, ScatteringError> {
    let data = LawData::read(dlw_sub_array, start_index, table, mt)?;
    let (tables, angular) = data.outgoing_energy_tables(true, |outgoing, next| {
        let num_points = outgoing.x().len();
        let locators = data.record.slice(next, num_points, "correlated cosine locators").map_err(|e| data.fail(e))?;
        locators.iter()
            .map(|&locator| -> Result<AngularDistribution, DistributionError> {
                match crate::utils::xss_int(locator).abs() {
                    0 => Ok(AngularDistribution::Isotropic(IsotropicAngularDistribution)),
                    locator => {
                        let index = data.record.locate(locator, "correlated cosine table")?;
                        Ok(AngularDistribution::Tabulated(read_tabulated_cosines(&data.record, index)?))
                    },
                }
            })
            .collect::<Result<Vec<_>, DistributionError>>()
            .map_err(|e| data.fail(e))
    })?;
    Law61Distribution::new(tables, angular, frame, atomic_weight_ratio).map_err(|e| data.fail(e))
}
