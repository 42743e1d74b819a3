//! Random number generation for dungeon builds
//!
//! Every stochastic decision draws from a [`UniformSource`]. The default
//! source is a seeded ChaCha RNG so a build can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A generator of uniform values in `[0, 1)`
pub trait UniformSource {
    /// Draw the next value in `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// Draw a value in `[-1, 1)`
    fn next_signed(&mut self) -> f64 {
        self.next_uniform() * 2.0 - 1.0
    }
}

impl<F> UniformSource for F
where
    F: FnMut() -> f64,
{
    fn next_uniform(&mut self) -> f64 {
        self()
    }
}

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng. Only the seed is serialized; deserializing restarts
/// the stream from the beginning.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for DungeonRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DungeonRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(DungeonRng::new(seed))
    }
}

impl DungeonRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for DungeonRng {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

impl Default for DungeonRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
