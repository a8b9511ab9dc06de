//! Injectable randomness for question draws, distractor picks and shuffles.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform indices.
pub trait RandomSource: Send {
    /// Returns an index in `0..upper`. `upper` is always greater than zero.
    fn index_below(&mut self, upper: usize) -> usize;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index_below(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

/// Reproducible generator for a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_below(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed sequence of values, each reduced modulo `upper`.
///
/// Once the script runs out, draws count up from `0`, so every value below
/// `upper` keeps coming back and rejection sampling terminates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<usize>,
    overflow: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
            overflow: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn index_below(&mut self, upper: usize) -> usize {
        let value = self.values.pop_front().unwrap_or_else(|| {
            let next = self.overflow;
            self.overflow = self.overflow.wrapping_add(1);
            next
        });
        value % upper
    }
}

/// Which generator new sessions use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Randomness {
    #[default]
    Thread,
    Seeded(u64),
}

impl Randomness {
    #[must_use]
    pub fn source(self) -> Box<dyn RandomSource> {
        match self {
            Self::Thread => Box::new(ThreadRandom),
            Self::Seeded(seed) => Box::new(SeededRandom::new(seed)),
        }
    }
}

/// Uniform in-place Fisher–Yates shuffle driven by `random`.
pub fn shuffle<T>(items: &mut [T], random: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = random.index_below(i + 1);
        items.swap(i, j);
    }
}
