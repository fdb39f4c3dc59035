//! Seeded random number generation
//!
//! Every luck-driven rule in the game (movesets, loot, level-up gains,
//! special tiles) draws from a single `GameRng` so a run can be replayed
//! from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game random number generator
///
/// Only the seed is serialized; a restored game gets a fresh stream from
/// the same seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Creates an RNG from a fixed seed
    pub fn new(seed: u64) -> Self {
        GameRng {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]`
    ///
    /// Swapped bounds are accepted, so `range_inclusive(5, 3)` draws from 3..=5.
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform integer in `0..n`, or 0 when `n` is 0
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns true with probability `chance` percent
    pub fn percent(&mut self, chance: i32) -> bool {
        let chance = chance.clamp(0, 100);
        (self.rng.gen_range(0..100)) < chance
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range
    pub fn uniform_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
