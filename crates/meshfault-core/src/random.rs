//! Randomness as an injected capability
//!
//! Failure draws never reach for ambient randomness. Callers hand a
//! [`RandomSource`] to the simulator, which lets tests script exact
//! survive/fail patterns and lets the CLI reproduce a run from a seed.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random values consumed by failure simulation
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`
    ///
    /// `len` is always non-zero when called by the simulator.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Adapter from any [`rand::Rng`] to [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Unwrap the generator
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from operating system entropy
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic generator; the same seed replays the same run
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays fixed sequences of draws and picks
///
/// Once the draws run out the last draw repeats (0.0 if none were
/// given). Once the picks run out every pick is index 0. Picks are
/// reduced modulo `len` so a script never yields an out-of-range index.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    picks: VecDeque<usize>,
    last_draw: f64,
}

impl ScriptedSource {
    /// Script both draw and pick sequences
    pub fn new(draws: impl IntoIterator<Item = f64>, picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            picks: picks.into_iter().collect(),
            last_draw: 0.0,
        }
    }

    /// Every draw returns `value`
    pub fn constant(value: f64) -> Self {
        Self {
            draws: VecDeque::new(),
            picks: VecDeque::new(),
            last_draw: value,
        }
    }

    /// Draws not yet consumed
    pub fn remaining_draws(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if let Some(draw) = self.draws.pop_front() {
            self.last_draw = draw;
        }
        self.last_draw
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match (self.picks.pop_front(), len) {
            (_, 0) => 0,
            (Some(pick), len) => pick % len,
            (None, _) => 0,
        }
    }
}
