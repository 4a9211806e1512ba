//! Production random source backed by `rand`'s `StdRng`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// Uniform draws on `(-1, 1)`, seeded from the OS.
pub struct UniformRandomSource {
    rng: StdRng,
}

impl UniformRandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for UniformRandomSource {
    fn next_offset(&mut self) -> f64 {
        // `random_range` is half-open; reject the lower bound to keep the interval open.
        loop {
            let offset: f64 = self.rng.random_range(-1.0..1.0);
            if offset > -1.0 {
                return offset;
            }
        }
    }
}
