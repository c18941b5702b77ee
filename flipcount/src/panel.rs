//! The control panel: single entry point wiring engine, advisor, and tally.
//!
//! `ControlPanel` implements the caller contract a front end or driver
//! programs against. Every user gesture funnels through [`press`],
//! [`reset`], or [`set_modulus`]; the periodic tick source calls [`tick`];
//! everything else is read-side.
//!
//! The press contract is where the learning invariant lives: a manual mode
//! press is recorded into the advisor's window before it activates, while an
//! AI press resolves through [`ModeAdvisor::decide`] and is deliberately NOT
//! recorded; the advisor only ever learns from direct user choices.
//!
//! [`press`]: ControlPanel::press
//! [`reset`]: ControlPanel::reset
//! [`set_modulus`]: ControlPanel::set_modulus
//! [`tick`]: ControlPanel::tick

use std::sync::Arc;

use crate::activity::ActivityTally;
use crate::advisor::{Decision, ModeAdvisor};
use crate::circuit::CircuitView;
use crate::engine::{CounterEngine, CounterState};
use crate::error::CounterError;
use crate::mode::{ControlInput, Mode};
use crate::time::Clock;
use crate::types::{CounterValue, Modulus};

/// Front-panel facade over the counter engine and mode advisor.
#[derive(Debug)]
pub struct ControlPanel {
    engine: CounterEngine,
    advisor: ModeAdvisor,
    tally: ActivityTally,
}

impl ControlPanel {
    /// Creates a panel with an idle engine at the default modulus.
    ///
    /// # Parameters
    /// - `clock`: Clock implementation for decision timestamps.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: CounterEngine::new(),
            advisor: ModeAdvisor::new(clock),
            tally: ActivityTally::new(),
        }
    }

    /// Creates a panel with a specific starting modulus.
    pub fn with_modulus(clock: Arc<dyn Clock>, modulus: Modulus) -> Self {
        Self {
            engine: CounterEngine::with_modulus(modulus),
            advisor: ModeAdvisor::new(clock),
            tally: ActivityTally::new(),
        }
    }

    /// Handles one press of a mode control.
    ///
    /// Manual controls record the choice into the advisor's window, activate
    /// the mode, and bump that control's tally. The AI control asks the
    /// advisor to decide, activates the decided mode, bumps the AI tally,
    /// and leaves the learning window untouched.
    ///
    /// # Returns
    /// The advisor's [`Decision`] for an AI press, `None` for manual presses.
    pub fn press(&mut self, input: ControlInput) -> Option<Decision> {
        self.tally.record(input);
        match input.as_mode() {
            Some(mode) => {
                self.advisor.record_choice(mode);
                self.engine.set_mode(mode);
                None
            }
            None => {
                let decision = self.advisor.decide();
                self.engine.set_mode(decision.decided_mode);
                Some(decision)
            }
        }
    }

    /// Stops the machine and zeroes the counter.
    ///
    /// Only engine state is cleared; the activity tally, decision log, and
    /// learning window all persist across resets.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Reconfigures the modulus.
    ///
    /// # Errors
    /// - [`CounterError::InvalidModulus`] - Request below 1 or above
    ///   `u32::MAX`; nothing changes.
    pub fn set_modulus(&mut self, requested: i64) -> Result<(), CounterError> {
        self.engine.set_modulus(requested)
    }

    /// Applies one tick to the engine.
    ///
    /// # Returns
    /// The counter value after the tick.
    pub fn tick(&mut self) -> CounterValue {
        self.engine.advance()
    }

    /// Snapshot of the engine for display consumers.
    pub fn state(&self) -> CounterState {
        self.engine.state()
    }

    /// Flip-flop register view of the current state.
    pub fn circuit(&self) -> CircuitView {
        CircuitView::for_state(self.engine.value(), self.engine.modulus())
    }

    /// The advisor's learning window, oldest choice first.
    pub fn recent_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.advisor.recent_modes()
    }

    /// Retained advisor decisions, most recent first.
    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.advisor.decisions()
    }

    /// Per-control usage tally.
    pub fn tally(&self) -> &ActivityTally {
        &self.tally
    }

    /// Direct read access to the engine.
    pub fn engine(&self) -> &CounterEngine {
        &self.engine
    }

    /// Direct read access to the advisor.
    pub fn advisor(&self) -> &ModeAdvisor {
        &self.advisor
    }
}
