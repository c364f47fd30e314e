//! Entropy adapter backed by any [`rand::Rng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::EntropyPort;

/// Uniform `[0, 1)` noise for the temperature drift.
pub struct RngEntropy<R: Rng> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<StdRng> {
    /// Reproducible stream for demos and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EntropyPort for RngEntropy<R> {
    fn roll(&mut self) -> f32 {
        self.rng.gen_range(0.0f32..1.0)
    }
}
