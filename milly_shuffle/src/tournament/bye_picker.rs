//! Random tie-break for bye selection.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

/// Source of the random choice between bye candidates.
///
/// `pick` receives the number of tied candidates (always at least one) and
/// returns the index of the chosen one. Out-of-range answers are wrapped.
pub trait ByePicker {
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random picker backed by a standard RNG
pub struct RandomByePicker {
    /// Random number generator
    rng: StdRng,
}

impl RandomByePicker {
    /// Create a picker seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible picker
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomByePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ByePicker for RandomByePicker {
    fn pick(&mut self, candidates: usize) -> usize {
        if candidates <= 1 {
            return 0;
        }
        self.rng.random_range(0..candidates)
    }
}

/// Picker that replays a fixed list of choices, then keeps choosing the
/// first candidate.
#[derive(Debug, Clone, Default)]
pub struct ScriptedByePicker {
    choices: VecDeque<usize>,
}

impl ScriptedByePicker {
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }
}

impl ByePicker for ScriptedByePicker {
    fn pick(&mut self, candidates: usize) -> usize {
        let choice = self.choices.pop_front().unwrap_or(0);
        choice % candidates.max(1)
    }
}
