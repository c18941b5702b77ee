//! Per-control usage tally.
//!
//! Counts how many times each front-panel control has been invoked. The AI
//! control is tallied separately from whatever mode it resolves to, so the
//! activity chart can show how often the user delegated the choice. Tallies
//! are monotonically non-decreasing; a counter [`reset`] does not clear them.
//!
//! [`reset`]: crate::engine::CounterEngine::reset

use serde::{Deserialize, Serialize};

use crate::mode::ControlInput;

/// Invocation counts for each of the four panel controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityTally {
    up: u64,
    down: u64,
    modulo_n: u64,
    ai: u64,
}

impl ActivityTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation of the given control.
    pub fn record(&mut self, input: ControlInput) {
        let slot = match input {
            ControlInput::Up => &mut self.up,
            ControlInput::Down => &mut self.down,
            ControlInput::ModuloN => &mut self.modulo_n,
            ControlInput::Ai => &mut self.ai,
        };
        *slot = slot.saturating_add(1);
    }

    /// Invocation count for one control.
    pub fn count(&self, input: ControlInput) -> u64 {
        match input {
            ControlInput::Up => self.up,
            ControlInput::Down => self.down,
            ControlInput::ModuloN => self.modulo_n,
            ControlInput::Ai => self.ai,
        }
    }

    /// Total invocations across all controls.
    pub fn total(&self) -> u64 {
        ControlInput::ALL
            .iter()
            .map(|input| self.count(*input))
            .sum()
    }
}
