use rand::RngCore;

//=====================================================================
// Deterministic RNG for tests. Each value handed to the constructor is
// returned, in order, by `rng.r#gen::<f64>()`. Values must be in [0, 1).
//=====================================================================
pub struct MockRng {
    values: Vec<f64>,
    index: usize,
}

impl MockRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    // Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!("MockRng does not support next_u32")
    }

    fn next_u64(&mut self) -> u64 {
        if self.index >= self.values.len() {
            panic!("MockRng: Ran out of values to return");
        }
        let value = self.values[self.index];
        self.index += 1;
        // rand builds an f64 in [0, 1) from the upper 53 bits
        let scale = (1u64 << 53) as f64;
        ((value * scale) as u64) << 11
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        unimplemented!("MockRng does not support fill_bytes")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        unimplemented!("MockRng does not support try_fill_bytes")
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_values_round_trip() {
        let mut rng = MockRng::new(vec![0.0, 0.25, 0.5, 0.999]);
        assert_eq!(rng.r#gen::<f64>(), 0.0);
        assert_eq!(rng.r#gen::<f64>(), 0.25);
        assert_eq!(rng.r#gen::<f64>(), 0.5);
        assert_eq!(rng.r#gen::<f64>(), 0.999);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    #[should_panic(expected = "Ran out of values")]
    fn test_exhausted() {
        let mut rng = MockRng::new(vec![0.5]);
        let _: f64 = rng.r#gen();
        let _: f64 = rng.r#gen();
    }
}
