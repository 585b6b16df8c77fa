//! Injectable randomness
//!
//! The simulation never touches a global RNG. Obstacle placement and spawn
//! odds draw from a `RandomSource` handed to the field at construction, so a
//! seed (or a scripted sequence) fully determines a run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform random integers
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[min, max]`.
    ///
    /// A degenerate range (`max <= min`) yields `min`.
    fn random_int(&mut self, min: i32, max: i32) -> i32;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        (**self).random_int(min, max)
    }
}

/// Seeded PCG32 source (production)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Fixed sequence source for deterministic tests and replays.
///
/// Returns the configured values in order, cycling when exhausted, each
/// clamped into the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<i32>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, index: 0 }
    }

    /// Always returns the same value (clamped)
    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, min: i32, max: i32) -> i32 {
        let value = if self.values.is_empty() {
            min
        } else {
            self.values[self.index % self.values.len()]
        };
        self.index += 1;
        if max <= min {
            return min;
        }
        value.clamp(min, max)
    }
}
