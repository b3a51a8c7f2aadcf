//! Deterministic random number generation for self-play.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Forkable**: Independent streams per episode or arena game
//! - **Inverse-CDF sampling**: Weighted choice over a cumulative array
//!
//! ## Usage
//!
//! ```
//! use rust_tafl::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork one stream per self-play episode
//! let mut episode_rng = rng.fork();
//!
//! // Sample a move index from visit-derived probabilities
//! let idx = episode_rng.choose_weighted(&[0.0, 3.0, 1.0]);
//! assert!(matches!(idx, Some(1) | Some(2)));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while keeping well-distributed output.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose an index with probability proportional to its weight.
    ///
    /// Builds the cumulative array once and binary-searches a uniform draw
    /// scaled to the total mass. Weights need not sum to 1.0; negative and
    /// non-finite weights count as zero.
    ///
    /// Returns `None` if weights are empty or carry no mass.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0f64;
        for &w in weights {
            if w.is_finite() && w > 0.0 {
                total += f64::from(w);
            }
            cumulative.push(total);
        }

        if total <= 0.0 {
            return None;
        }

        let draw = self.inner.gen::<f64>() * total;
        // First bucket whose upper edge exceeds the draw; zero-weight buckets
        // have an empty interval and are never selected.
        let idx = cumulative.partition_point(|&edge| edge <= draw);
        if idx < weights.len() {
            Some(idx)
        } else {
            // draw landed on the final edge through rounding
            weights.iter().rposition(|&w| w.is_finite() && w > 0.0)
        }
    }
}
