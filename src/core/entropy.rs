//! Randomness capability injected into every simulation stage.
//!
//! Any [`rand::Rng`] is an [`EntropySource`], so callers can pass the
//! thread-local generator for ad-hoc runs or a seeded [`StdRng`] for
//! reproducible ones.

use crate::core::basis::Basis;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait EntropySource {
    /// Uniformly random bit.
    fn next_bit(&mut self) -> bool;

    /// Uniformly random basis, independent of [`EntropySource::next_bit`].
    fn next_basis(&mut self) -> Basis;

    /// Returns `true` with probability `p`.
    ///
    /// `p` must lie in `[0, 1]`; parameters are validated when
    /// [`RunParameters`](crate::protocols::bb84::RunParameters) are built.
    fn flip_with_probability(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> EntropySource for R {
    fn next_bit(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn next_basis(&mut self) -> Basis {
        Basis::from_coin(self.random_bool(0.5))
    }

    fn flip_with_probability(&mut self, p: f64) -> bool {
        // Avoid consuming randomness on the certain branches
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.random_bool(p)
        }
    }
}

/// Deterministic entropy source for reproducible runs.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh seed from the operating system.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}
