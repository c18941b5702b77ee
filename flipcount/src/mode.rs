//! Counting modes and control inputs for the counter circuit.
//!
//! `Mode` is the engine-side state: which direction the counter steps on each
//! tick, or `Idle` when the machine is stopped. `ControlInput` is the
//! user-side surface: the four controls a front panel exposes. The two are
//! distinct because `Ai` is a meta-selection: it resolves to a concrete
//! `Mode` through the [`ModeAdvisor`] and is never stored as engine state.
//!
//! [`ModeAdvisor`]: crate::advisor::ModeAdvisor

use std::fmt;

use serde::{Deserialize, Serialize};

/// Active counting behavior of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Count upward, wrapping at the modulus boundary.
    Up,
    /// Count downward, wrapping to `N-1` from 0.
    Down,
    /// Mod-N counting. Arithmetic coincides with `Up` but is driven by a
    /// separate control and tallied separately.
    ModuloN,
    /// Machine idle; ticks have no effect.
    #[default]
    Idle,
}

impl Mode {
    /// The canonical enumeration order used for tallying and tie-breaking.
    ///
    /// When two modes share the maximum count in the history window, the one
    /// appearing earliest here wins.
    pub const CANONICAL: [Mode; 3] = [Mode::Up, Mode::Down, Mode::ModuloN];

    /// Whether this mode actually steps the counter on a tick.
    #[inline]
    pub const fn is_counting(self) -> bool {
        !matches!(self, Mode::Idle)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Up => "UP",
            Mode::Down => "DOWN",
            Mode::ModuloN => "MOD-N",
            Mode::Idle => "IDLE",
        };
        f.write_str(label)
    }
}

/// One of the four controls a user can press on the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlInput {
    /// Select Up mode.
    Up,
    /// Select Down mode.
    Down,
    /// Select Mod-N mode.
    ModuloN,
    /// Let the advisor pick a mode from recent usage.
    Ai,
}

impl ControlInput {
    /// All controls, in panel order. Used to iterate the activity tally.
    pub const ALL: [ControlInput; 4] = [
        ControlInput::Up,
        ControlInput::Down,
        ControlInput::ModuloN,
        ControlInput::Ai,
    ];

    /// The mode this control selects directly, or `None` for `Ai` (which
    /// resolves through the advisor instead).
    #[inline]
    pub const fn as_mode(self) -> Option<Mode> {
        match self {
            ControlInput::Up => Some(Mode::Up),
            ControlInput::Down => Some(Mode::Down),
            ControlInput::ModuloN => Some(Mode::ModuloN),
            ControlInput::Ai => None,
        }
    }
}

impl fmt::Display for ControlInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ControlInput::Up => "UP",
            ControlInput::Down => "DOWN",
            ControlInput::ModuloN => "MOD-N",
            ControlInput::Ai => "AI",
        };
        f.write_str(label)
    }
}
