//! Core library for the Flipcount Deterministic Simulator.
//!
//! This library provides the main components for running deterministic
//! simulations of the counter circuit: configuration, a seeded user-action
//! script, and the simulator orchestration logic with per-tick invariant
//! verification. The counter functionality itself is provided by the
//! `flipcount` crate.

use std::sync::Arc;

use flipcount::time::mock_clock::MockClock;
use flipcount::{ControlInput, ControlPanel, CounterState, Mode, Modulus};
use rand::prelude::*;
use rand::rngs::StdRng;

pub mod ticker;

/// Configuration for a simulation scenario.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Seed for all random number generation to ensure determinism.
    pub seed: u64,
    /// Number of ticks to drive through the panel.
    pub num_ticks: usize,
    /// A scripted user action is applied every `action_period` ticks.
    pub action_period: usize,
    /// Probability that a scripted action is an AI press.
    pub ai_probability: f64,
    /// Probability that a scripted action is a reset.
    pub reset_probability: f64,
    /// Probability that a scripted action is a modulus change.
    pub modulus_change_probability: f64,
    /// Inclusive range for scripted modulus changes.
    pub modulus_min: u32,
    pub modulus_max: u32,
    /// Starting modulus of the simulated panel.
    pub initial_modulus: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_ticks: 200,
            action_period: 7,
            ai_probability: 0.25,
            reset_probability: 0.05,
            modulus_change_probability: 0.15,
            modulus_min: 2,
            modulus_max: 16,
            initial_modulus: 10,
        }
    }
}

impl SimConfig {
    /// Validates the configuration before a run.
    ///
    /// # Errors
    /// - [`SimError::InvalidConfig`] - Zero action period, probabilities out
    ///   of range or summing past 1.0, or an empty modulus range.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.action_period == 0 {
            return Err(SimError::InvalidConfig {
                message: "action_period must be >= 1".to_string(),
            });
        }
        let probabilities = [
            self.ai_probability,
            self.reset_probability,
            self.modulus_change_probability,
        ];
        if probabilities.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(SimError::InvalidConfig {
                message: "probabilities must be within 0.0..=1.0".to_string(),
            });
        }
        if probabilities.iter().sum::<f64>() > 1.0 {
            return Err(SimError::InvalidConfig {
                message: "action probabilities must sum to at most 1.0".to_string(),
            });
        }
        if self.modulus_min < 1 || self.modulus_min > self.modulus_max {
            return Err(SimError::InvalidConfig {
                message: format!(
                    "modulus range {}..={} is empty or starts below 1",
                    self.modulus_min, self.modulus_max
                ),
            });
        }
        if self.initial_modulus < 1 {
            return Err(SimError::InvalidConfig {
                message: "initial_modulus must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// One scripted user gesture against the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedAction {
    /// Press one of the four mode controls.
    Press(ControlInput),
    /// Request a modulus change; may deliberately be out of range.
    SetModulus(i64),
    /// Press the reset control.
    Reset,
}

/// Generates a deterministic stream of user actions from the config's seed.
pub struct ActionScript {
    rng: StdRng,
    config: SimConfig,
}

impl ActionScript {
    /// Creates a new action script for the given configuration.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config: config.clone(),
        }
    }

    /// Draws the next scripted action.
    ///
    /// Roughly one in ten scripted modulus changes is deliberately invalid
    /// (zero or negative) to exercise the engine's silent-rejection path.
    pub fn next_action(&mut self) -> ScriptedAction {
        let roll: f64 = self.rng.random();

        if roll < self.config.reset_probability {
            return ScriptedAction::Reset;
        }
        if roll < self.config.reset_probability + self.config.modulus_change_probability {
            if self.rng.random_bool(0.1) {
                return ScriptedAction::SetModulus(-i64::from(self.rng.random_range(0..100u32)));
            }
            let n = self
                .rng
                .random_range(self.config.modulus_min..=self.config.modulus_max);
            return ScriptedAction::SetModulus(i64::from(n));
        }
        if roll
            < self.config.reset_probability
                + self.config.modulus_change_probability
                + self.config.ai_probability
        {
            return ScriptedAction::Press(ControlInput::Ai);
        }

        let manual = match self.rng.random_range(0..3u8) {
            0 => ControlInput::Up,
            1 => ControlInput::Down,
            _ => ControlInput::ModuloN,
        };
        ScriptedAction::Press(manual)
    }
}

/// Errors that can occur during a simulation run.
#[derive(Debug)]
pub enum SimError {
    InvalidConfig {
        message: String,
    },
    InvariantViolation {
        tick: usize,
        message: String,
    },
}

/// Aggregate outcome of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimReport {
    pub seed: u64,
    pub ticks_applied: usize,
    pub presses: u64,
    pub ai_decisions: u64,
    pub resets: u64,
    pub modulus_changes: u64,
    pub rejected_modulus_requests: u64,
    pub final_state: CounterState,
}

/// Orchestrates a single deterministic simulation run.
///
/// Drives a [`ControlPanel`] with a mock clock through `num_ticks` ticks,
/// interleaving scripted user actions, and verifies the core invariants
/// after every step: the value range, the bounded window and decision log,
/// tally consistency, and that AI presses never touch the learning window.
pub struct CounterSimulator {
    config: SimConfig,
    clock: Arc<MockClock>,
    panel: ControlPanel,
    script: ActionScript,
    presses: u64,
    ai_decisions: u64,
    resets: u64,
    modulus_changes: u64,
    rejected_modulus_requests: u64,
}

impl CounterSimulator {
    /// Creates a new simulation instance from a configuration.
    pub fn new(config: SimConfig) -> Self {
        let clock = Arc::new(MockClock::default());
        let panel = ControlPanel::with_modulus(
            clock.clone(),
            Modulus::new(config.initial_modulus.max(1)),
        );
        let script = ActionScript::new(&config);
        Self {
            config,
            clock,
            panel,
            script,
            presses: 0,
            ai_decisions: 0,
            resets: 0,
            modulus_changes: 0,
            rejected_modulus_requests: 0,
        }
    }

    /// Runs the simulation to completion.
    ///
    /// # Returns
    /// A [`SimReport`] summarizing the run.
    ///
    /// # Errors
    /// - [`SimError::InvalidConfig`] - Configuration rejected up front.
    /// - [`SimError::InvariantViolation`] - A core invariant failed to hold
    ///   after some tick; the tick index and a description are attached.
    pub fn run(&mut self) -> Result<SimReport, SimError> {
        self.config.validate()?;

        for tick in 0..self.config.num_ticks {
            self.clock.set_timestamp_label(tick_label(tick));
            if tick % self.config.action_period == 0 {
                self.apply_scripted_action(tick)?;
            }
            self.panel.tick();
            self.clock
                .advance(flipcount::constants::DEFAULT_TICK_INTERVAL);
            self.verify_invariants(tick)?;
        }

        Ok(SimReport {
            seed: self.config.seed,
            ticks_applied: self.config.num_ticks,
            presses: self.presses,
            ai_decisions: self.ai_decisions,
            resets: self.resets,
            modulus_changes: self.modulus_changes,
            rejected_modulus_requests: self.rejected_modulus_requests,
            final_state: self.panel.state(),
        })
    }

    /// Read access to the simulated panel, for post-run inspection.
    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    fn apply_scripted_action(&mut self, tick: usize) -> Result<(), SimError> {
        match self.script.next_action() {
            ScriptedAction::Press(ControlInput::Ai) => {
                let window_before: Vec<Mode> = self.panel.recent_modes().collect();
                let decision = self.panel.press(ControlInput::Ai).ok_or_else(|| {
                    SimError::InvariantViolation {
                        tick,
                        message: "AI press returned no decision".to_string(),
                    }
                })?;
                self.presses += 1;
                self.ai_decisions += 1;

                let window_after: Vec<Mode> = self.panel.recent_modes().collect();
                if window_before != window_after {
                    return Err(SimError::InvariantViolation {
                        tick,
                        message: "AI press mutated the learning window".to_string(),
                    });
                }
                if !decision.decided_mode.is_counting() {
                    return Err(SimError::InvariantViolation {
                        tick,
                        message: format!("AI decided non-counting mode {}", decision.decided_mode),
                    });
                }
                if self.panel.state().mode != decision.decided_mode {
                    return Err(SimError::InvariantViolation {
                        tick,
                        message: "engine mode does not match the AI decision".to_string(),
                    });
                }
            }
            ScriptedAction::Press(input) => {
                self.panel.press(input);
                self.presses += 1;
                if self.panel.state().mode != input.as_mode().unwrap() {
                    return Err(SimError::InvariantViolation {
                        tick,
                        message: format!("engine mode does not match pressed control {}", input),
                    });
                }
            }
            ScriptedAction::SetModulus(requested) => {
                let before = self.panel.state();
                match self.panel.set_modulus(requested) {
                    Ok(()) => {
                        self.modulus_changes += 1;
                        if self.panel.state().modulus.value() as i64 != requested {
                            return Err(SimError::InvariantViolation {
                                tick,
                                message: format!("modulus change to {} did not apply", requested),
                            });
                        }
                    }
                    Err(_) => {
                        self.rejected_modulus_requests += 1;
                        if self.panel.state() != before {
                            return Err(SimError::InvariantViolation {
                                tick,
                                message: format!(
                                    "rejected modulus request {} changed engine state",
                                    requested
                                ),
                            });
                        }
                    }
                }
            }
            ScriptedAction::Reset => {
                self.panel.reset();
                self.resets += 1;
                let state = self.panel.state();
                if state.value != 0u32 || state.mode != Mode::Idle || state.running {
                    return Err(SimError::InvariantViolation {
                        tick,
                        message: "reset left the engine outside its initial state".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn verify_invariants(&self, tick: usize) -> Result<(), SimError> {
        let state = self.panel.state();

        if state.running && state.value.value() >= state.modulus.value() {
            return Err(SimError::InvariantViolation {
                tick,
                message: format!(
                    "value {} escaped range 0..{}",
                    state.value, state.modulus
                ),
            });
        }
        if self.panel.recent_modes().count() > flipcount::constants::MODE_HISTORY_WINDOW {
            return Err(SimError::InvariantViolation {
                tick,
                message: "learning window exceeded its capacity".to_string(),
            });
        }
        if self.panel.decisions().count() > flipcount::constants::DECISION_LOG_CAP {
            return Err(SimError::InvariantViolation {
                tick,
                message: "decision log exceeded its capacity".to_string(),
            });
        }
        if self.panel.tally().total() != self.presses {
            return Err(SimError::InvariantViolation {
                tick,
                message: format!(
                    "tally total {} disagrees with {} applied presses",
                    self.panel.tally().total(),
                    self.presses
                ),
            });
        }
        Ok(())
    }
}

/// Synthetic `HH:MM:SS` label for a tick index, at the default tick cadence.
fn tick_label(tick: usize) -> String {
    let total_secs = (tick as u64 * flipcount::constants::DEFAULT_TICK_INTERVAL.as_millis() as u64)
        / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs / 60) % 60,
        total_secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_action_period_is_rejected() {
        let config = SimConfig {
            action_period: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn oversubscribed_probabilities_are_rejected() {
        let config = SimConfig {
            ai_probability: 0.6,
            reset_probability: 0.3,
            modulus_change_probability: 0.3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn action_script_is_deterministic_per_seed() {
        let config = SimConfig {
            seed: 42,
            ..Default::default()
        };
        let mut left = ActionScript::new(&config);
        let mut right = ActionScript::new(&config);
        for _ in 0..50 {
            assert_eq!(left.next_action(), right.next_action());
        }
    }

    #[test]
    fn tick_labels_follow_the_default_cadence() {
        assert_eq!(tick_label(0), "00:00:00");
        assert_eq!(tick_label(2), "00:00:01");
        assert_eq!(tick_label(7200), "01:00:00");
    }
}
