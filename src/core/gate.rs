//! Skip gate
//!
//! Decides once per invocation whether today's run does any work at all.
//! The pipeline never consults it; the caller does, before running.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait SkipGate {
    fn should_skip(&mut self) -> bool;
}

/// Always runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSkip;

impl SkipGate for NeverSkip {
    fn should_skip(&mut self) -> bool {
        false
    }
}

/// Skips with a fixed probability
#[derive(Debug, Clone)]
pub struct RandomSkipGate<R: Rng = StdRng> {
    probability: f64,
    rng: R,
}

impl RandomSkipGate<StdRng> {
    /// Gate seeded from the OS
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSkipGate<R> {
    pub fn with_rng(probability: f64, rng: R) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<R: Rng> SkipGate for RandomSkipGate<R> {
    fn should_skip(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }
}
