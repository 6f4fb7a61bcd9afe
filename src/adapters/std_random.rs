//! Production randomness adapter backed by `StdRng`.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ports::RandomSource;

/// Uniform draws from a `StdRng`, optionally seeded for reproducibility.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
    seed: Option<u64>,
}

impl StdRandom {
    /// Seeded source: identical seeds give identical draw sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            seed: None,
        }
    }

    /// Build from an optional seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
