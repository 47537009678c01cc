use rand::Rng;

// Random number in [0.0, 1.0] handed to the low level sampling routines.
// The range is checked in debug builds only, keeping the hot sampling
// path free of runtime checks in release builds.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UnitF64(pub f64);

impl UnitF64 {
    #[inline(always)]
    pub fn new_unchecked(val: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&val),
            "UnitF64 must be in [0.0, 1.0], got {}",
            val
        );
        UnitF64(val)
    }

    // Draw the next random number from a generator
    #[inline(always)]
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        UnitF64(rng.r#gen::<f64>())
    }
}
