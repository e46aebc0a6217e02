//! Seedable random numbers for spawn rolls.
//!
//! Same seed, same sequence: tests pin a seed through `Tunables::rng_seed`
//! and get reproducible hazard positions and star bounces.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self { inner: ChaCha8Rng::from_entropy() }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Integer in `lo..=hi`, both ends inclusive. Returns `lo` for an empty range.
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// Float in `lo..hi`. Returns `lo` for an empty range.
    pub fn float_between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..hi)
    }
}
