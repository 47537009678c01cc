use num_enum::TryFromPrimitive;
use strum_macros::Display;

//=====================================================================
// ENDF interpolation laws, tagged by their INT flag
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Hash, TryFromPrimitive, Display)]
#[repr(i64)]
pub enum InterpolationScheme {
    Histogram = 1,
    LinLin = 2,
    LinLog = 3,
    LogLin = 4,
    LogLog = 5,
    Gamow = 6,
}
