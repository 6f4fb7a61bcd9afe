//! Deterministic randomness adapter for tests.
//!
//! Replays queued rolls and picks and records every draw, so tests can assert
//! exactly which policy branch was taken without statistical sampling.

use std::collections::VecDeque;

use crate::ports::RandomSource;

/// A single recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    /// `roll()` returned this value
    Roll(f64),
    /// `pick(len)` returned `index`
    Pick { len: usize, index: usize },
}

/// Scripted random source.
///
/// When a queue runs dry, rolls fall back to `fallback_roll` and picks to
/// index 0. Queued pick indices are reduced modulo `len`.
///
/// # Examples
///
/// ```
/// use smartcab::adapters::{Draw, ScriptedRandom};
/// use smartcab::ports::RandomSource;
///
/// let mut rng = ScriptedRandom::new().with_rolls([0.25]).with_picks([2]);
/// assert_eq!(rng.roll(), 0.25);
/// assert_eq!(rng.pick(4), 2);
/// assert_eq!(rng.draws(), &[Draw::Roll(0.25), Draw::Pick { len: 4, index: 2 }]);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    rolls: VecDeque<f64>,
    picks: VecDeque<usize>,
    fallback_roll: f64,
    draws: Vec<Draw>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            rolls: VecDeque::new(),
            picks: VecDeque::new(),
            fallback_roll: 0.0,
            draws: Vec::new(),
        }
    }

    /// Queue values returned by successive `roll()` calls.
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue indices returned by successive `pick()` calls.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Value returned once the roll queue is empty.
    pub fn with_fallback_roll(mut self, roll: f64) -> Self {
        self.fallback_roll = roll;
        self
    }

    /// Every draw made so far, in order.
    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    /// Lengths passed to `pick()`, in order.
    pub fn pick_lens(&self) -> Vec<usize> {
        self.draws
            .iter()
            .filter_map(|draw| match draw {
                Draw::Pick { len, .. } => Some(*len),
                Draw::Roll(_) => None,
            })
            .collect()
    }

    /// Forget recorded draws; queued values are kept.
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self) -> f64 {
        let value = self.rolls.pop_front().unwrap_or(self.fallback_roll);
        self.draws.push(Draw::Roll(value));
        value
    }

    fn pick(&mut self, len: usize) -> usize {
        let index = self.picks.pop_front().unwrap_or(0) % len.max(1);
        self.draws.push(Draw::Pick { len, index });
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_queues_then_falls_back() {
        let mut rng = ScriptedRandom::new()
            .with_rolls([0.1])
            .with_picks([5])
            .with_fallback_roll(0.9);
        assert_eq!(rng.roll(), 0.1);
        assert_eq!(rng.roll(), 0.9);
        assert_eq!(rng.pick(4), 1);
        assert_eq!(rng.pick(4), 0);
        assert_eq!(rng.pick_lens(), vec![4, 4]);
    }

    #[test]
    fn test_clear_draws_keeps_queue() {
        let mut rng = ScriptedRandom::new().with_rolls([0.3, 0.4]);
        rng.roll();
        rng.clear_draws();
        assert!(rng.draws().is_empty());
        assert_eq!(rng.roll(), 0.4);
    }
}
