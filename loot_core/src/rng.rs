//! RandomSource - Swappable uniform random provider
//!
//! Generation and drop resolution take the source by `&mut` so each call
//! chain owns its randomness and seeded runs are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform random numbers for sampling and value rolls
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn uniform(&mut self) -> f32;

    /// Uniform value linearly mapped onto `[min, max)`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.uniform() * (max - min)
    }

    /// Uniform integer in `[min, max_exclusive)`
    ///
    /// An empty interval yields `min`.
    fn range_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        let span = max_exclusive - min;
        let offset = (self.uniform() * span as f32).floor() as i32;
        min + offset.clamp(0, span - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f32 {
        (**self).uniform()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f32 {
        (**self).uniform()
    }
}

/// Entropy seeded randomness for live play
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        SystemRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn uniform(&mut self) -> f32 {
        self.rng.gen()
    }
}

/// Deterministic randomness, stable across platforms for a given seed
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self) -> f32 {
        self.rng.gen()
    }
}

/// Replays a fixed list of uniform values, cycling when exhausted
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    values: Vec<f32>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        SequenceRandom {
            values: values.into(),
            next: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.next
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
