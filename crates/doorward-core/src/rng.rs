//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or
//! sequenced implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG seeded from the operating system.
#[derive(Debug)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Creates an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRandom {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_u32_range_stays_within_bounds() {
        let mut rng = StdRandom::seeded(7);
        for _ in 0..1_000 {
            let value = rng.next_u32_range(0, 9_999);
            assert!(value <= 9_999);
        }
    }

    #[test]
    fn test_seeded_rngs_are_reproducible() {
        let mut a = StdRandom::seeded(42);
        let mut b = StdRandom::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32_range(0, 100), b.next_u32_range(0, 100));
        }
    }
}
