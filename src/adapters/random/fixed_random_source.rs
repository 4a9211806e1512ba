//! Scripted random source for deterministic scenarios.

use crate::ports::RandomSource;

/// Replays a fixed list of offsets, cycling when exhausted.
///
/// Callers are responsible for keeping the offsets within `(-1, 1)`.
#[derive(Debug, Clone)]
pub struct FixedRandomSource {
    offsets: Vec<f64>,
    position: usize,
}

impl FixedRandomSource {
    /// Always returns `offset`.
    pub fn constant(offset: f64) -> Self {
        Self::cycle(vec![offset])
    }

    /// Returns `offsets` in order, then starts over. An empty list yields `0.0`.
    pub fn cycle(offsets: Vec<f64>) -> Self {
        Self {
            offsets,
            position: 0,
        }
    }
}

impl RandomSource for FixedRandomSource {
    fn next_offset(&mut self) -> f64 {
        if self.offsets.is_empty() {
            return 0.0;
        }
        let offset = self.offsets[self.position % self.offsets.len()];
        self.position += 1;
        offset
    }
}
