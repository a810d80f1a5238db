//! Injectable decision source
//!
//! The only non-determinism in a match: the corner-vs-goal-kick call past the
//! attacking goal line, the corner side, and goalmouth scramble spots. All of
//! it is drawn from one `DecisionSource`, so a seed (or a scripted queue in
//! tests) fully determines the event log.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when the caller does not supply one
pub const DEFAULT_SEED: u64 = 0x5EED_F007;

pub trait DecisionSource {
    /// Uniform roll in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }
}

impl<D: DecisionSource + ?Sized> DecisionSource for &mut D {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

impl<D: DecisionSource + ?Sized> DecisionSource for Box<D> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

// ============================================================================
// SeededDecisions
// ============================================================================

/// ChaCha8-backed source; identical sequences for identical seeds on every platform.
#[derive(Debug, Clone)]
pub struct SeededDecisions {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededDecisions {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SeededDecisions {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DecisionSource for SeededDecisions {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

// ============================================================================
// ScriptedDecisions
// ============================================================================

/// Replays queued rolls, then repeats `fallback` forever.
///
/// ```
/// use match_core::decision::{DecisionSource, ScriptedDecisions};
///
/// let mut d = ScriptedDecisions::new([0.9, 0.1]).with_fallback(0.25);
/// assert_eq!(d.next_unit(), 0.9);
/// assert_eq!(d.next_unit(), 0.1);
/// assert_eq!(d.next_unit(), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedDecisions {
    rolls: VecDeque<f64>,
    fallback: f64,
    drawn: usize,
}

impl ScriptedDecisions {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self { rolls: rolls.into_iter().collect(), fallback: 0.5, drawn: 0 }
    }

    /// Same roll every time
    pub fn constant(roll: f64) -> Self {
        Self::new([]).with_fallback(roll)
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Rolls consumed so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn next_unit(&mut self) -> f64 {
        self.drawn += 1;
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
