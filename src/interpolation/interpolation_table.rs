use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::interpolation::{InterpolationRegion, InterpolationScheme, XY};
use crate::utils::xss_count;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    #[error("Invalid interpolation table: empty")]
    Empty,
    #[error("Interpolation region for x={x} not found, table covers [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },
    #[error("Interpolation scheme {0} is not supported here")]
    UnsupportedScheme(InterpolationScheme),
    #[error("Invalid interpolation scheme flag {0}")]
    InvalidScheme(i64),
    #[error("Malformed interpolation table: {0}")]
    Malformed(String),
}

//=====================================================================
// ENDF style interpolation table: one or more regions of X/Y pairs,
// each with its own interpolation scheme. Used for tabulated nu-bar,
// delayed precursor probabilities and the tabulated parameters of the
// analytic energy spectra.
//=====================================================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpolationTable ( pub Vec<InterpolationRegion> );

impl Deref for InterpolationTable {
    type Target = Vec<InterpolationRegion>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for InterpolationTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl InterpolationTable {
    // Creates a single region interpolation table from x and y vectors
    pub fn from_x_and_y(x: &[f64], y: &[f64], interpolation_scheme: InterpolationScheme) -> Result<Self, InterpolationError> {
        Ok(Self(vec![InterpolationRegion::from_x_and_y(x, y, interpolation_scheme)?]))
    }

    // Process an interpolation table from raw ACE data laid out as
    // NR, NBT(NR), INT(NR), NE, X(NE), Y(NE).
    pub fn process(data: &[f64]) -> Result<Self, InterpolationError> {
        let table_length = Self::get_table_length(0, data)?;
        let data = &data[..table_length];

        // First, get the number of interpolation regions
        let num_interp_regions = xss_count(data[0]);

        // We have a list of interpolation parameters and schemes
        // Split out raw data into interpolation bounds, regions, and xy data
        let bounds_start = 1;
        let schemes_start = bounds_start + num_interp_regions;
        let schemes_end = schemes_start + num_interp_regions;
        let num_data_points = xss_count(data[schemes_end]);
        let x_start = schemes_end + 1;
        let y_start = x_start + num_data_points;
        let x = &data[x_start..y_start];
        let y = &data[y_start..y_start + num_data_points];

        // If the number of regions is zero, this means we use linear-linear interpolation
        if num_interp_regions == 0 {
            return Self::from_x_and_y(x, y, InterpolationScheme::LinLin);
        }

        // Region boundaries, convert to zero-indexed for sanity
        let mut bounds = vec![0];
        for &val in &data[bounds_start..schemes_start] {
            let bound = xss_count(val);
            if bound == 0 || bound > num_data_points || bound - 1 < *bounds.last().unwrap_or(&0) {
                return Err(InterpolationError::Malformed(format!(
                    "region boundary {} is inconsistent with {} data points", bound, num_data_points
                )));
            }
            bounds.push(bound - 1);
        }
        if bounds.last() != Some(&(num_data_points.saturating_sub(1))) {
            return Err(InterpolationError::Malformed(format!(
                "last region boundary {} does not reach the {} data points", bounds.last().map_or(0, |b| b + 1), num_data_points
            )));
        }

        // Schemes
        let schemes = data[schemes_start..schemes_end]
            .iter()
            .map(|&val| {
                let flag = val.round() as i64;
                InterpolationScheme::try_from(flag).map_err(|_| InterpolationError::InvalidScheme(flag))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Create interpolation regions, neighbouring regions share their boundary point
        let regions = bounds
            .windows(2)
            .zip(schemes)
            .map(|(window, scheme)| {
                let (start, end) = (window[0], window[1]);
                InterpolationRegion {
                    data: (start..=end).map(|i| XY { x: x[i], y: y[i] }).collect(),
                    interpolation_scheme: scheme,
                }
            })
            .collect();

        Ok(InterpolationTable(regions))
    }

    // Number of XSS entries taken up by a table starting at `table_start`
    pub fn get_table_length(table_start: usize, array_containing_table: &[f64]) -> Result<usize, InterpolationError> {
        let read = |index: usize| -> Result<usize, InterpolationError> {
            array_containing_table
                .get(index)
                .map(|&val| xss_count(val))
                .ok_or_else(|| InterpolationError::Malformed(format!(
                    "table starting at {} runs past the end of its array ({} entries)",
                    table_start, array_containing_table.len()
                )))
        };

        // First, get the number of interpolation regions
        let num_interp_regions = read(table_start)?;
        // Then skip over the bounds and schemes to get the number of points
        let mut table_length = 1 + 2 * num_interp_regions;
        let num_data_points_per_vec = read(table_start + table_length)?;
        table_length += 1 + 2 * num_data_points_per_vec;

        if table_start + table_length > array_containing_table.len() {
            return Err(InterpolationError::Malformed(format!(
                "table starting at {} needs {} entries but only {} are available",
                table_start, table_length, array_containing_table.len() - table_start
            )));
        }
        Ok(table_length)
    }

    pub fn x_min(&self) -> f64 {
        self.first().map_or(f64::NAN, |region| region.x_min())
    }

    pub fn x_max(&self) -> f64 {
        self.last().map_or(f64::NAN, |region| region.x_max())
    }

    // Interpolate a value from the table
    pub fn interpolate(&self, x_val: f64) -> Result<f64, InterpolationError> {
        // Check if the table is valid
        if self.is_empty() {
            return Err(InterpolationError::Empty);
        }
        // Find the region that x_val falls into
        let region = self.iter()
            .find(|region| region.contains(x_val))
            .ok_or(InterpolationError::OutOfRange { x: x_val, min: self.x_min(), max: self.x_max() })?;

        // Find the first point at or above x_val
        let idx = region.data.partition_point(|xy| xy.x < x_val);
        // We are exactly on a data point, exit early by returning the value
        if region.data[idx].x == x_val {
            return Ok(region.data[idx].y);
        }

        // Get the start and end points of the bin
        let XY { x: x0, y: y0 } = region.data[idx - 1];
        let XY { x: x1, y: y1 } = region.data[idx];

        // Perform the interpolation
        match &region.interpolation_scheme {
            InterpolationScheme::Histogram => Ok(y0),
            InterpolationScheme::LinLin => Ok(y0 + (y1 - y0) * (x_val - x0) / (x1 - x0)),
            InterpolationScheme::LinLog => Ok(y0 + (y1 - y0) * (x_val / x0).ln() / (x1 / x0).ln()),
            InterpolationScheme::LogLin => Ok(y0 * ((x_val - x0) * (y1 / y0).ln() / (x1 - x0)).exp()),
            InterpolationScheme::LogLog => Ok(y0 * ((x_val / x0).ln() * (y1 / y0).ln() / (x1 / x0).ln()).exp()),
            InterpolationScheme::Gamow => Err(InterpolationError::UnsupportedScheme(InterpolationScheme::Gamow)),
        }
    }

    // Same as interpolate, but values outside the table take the value at
    // the nearest end point.
    pub fn evaluate(&self, x_val: f64) -> Result<f64, InterpolationError> {
        if self.is_empty() {
            return Err(InterpolationError::Empty);
        }
        self.interpolate(x_val.clamp(self.x_min(), self.x_max()))
    }
}
