use crate::interpolation::{InterpolationError, InterpolationScheme};

//=====================================================================
// X/Y pair for interpolation.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct XY {
    pub x: f64,
    pub y: f64,
}

//=====================================================================
// Interpolation region. This contains a set of X/Y pairs and the
// interpolation scheme to be used in the region.
//=====================================================================
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationRegion {
    pub data: Vec<XY>,
    pub interpolation_scheme: InterpolationScheme,
}

impl InterpolationRegion {
    pub fn from_x_and_y(x: &[f64], y: &[f64], interpolation_scheme: InterpolationScheme) -> Result<Self, InterpolationError> {
        // Ensure that the x and y vectors are of the same length
        if x.len() != y.len() {
            return Err(InterpolationError::Malformed(format!(
                "x ({}) and y ({}) vectors must be of the same length", x.len(), y.len()
            )));
        }

        // Zip the x and y vectors together into a vector of XY structs
        let data = x.iter().zip(y.iter()).map(|(&x, &y)| XY { x, y }).collect();

        Ok(Self { data, interpolation_scheme })
    }

    pub fn x_min(&self) -> f64 {
        self.data.first().map_or(f64::NAN, |xy| xy.x)
    }

    pub fn x_max(&self) -> f64 {
        self.data.last().map_or(f64::NAN, |xy| xy.x)
    }

    pub fn contains(&self, x_val: f64) -> bool {
        self.x_min() <= x_val && x_val <= self.x_max()
    }
}
