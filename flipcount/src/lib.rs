//! `flipcount`: An educational digital counter circuit simulator core.
//!
//! This library models a Mod-N flip-flop counter driven by a periodic tick,
//! together with an adaptive mode-selection heuristic that recommends a
//! counting direction from recent usage. Rendering and UI chrome are out of
//! scope; the library exposes the state a front end needs to draw the
//! circuit and its controls.
//!
//! ## Core Concepts
//!
//! - **[`CounterEngine`]**: The counter/mode state machine. Advances the
//!   value one step per tick according to the active [`Mode`] and modulus.
//! - **[`ModeAdvisor`]**: Converts a bounded window of past user choices
//!   into a recommended mode with a confidence score and justification.
//! - **[`ControlPanel`]**: The caller contract. Wires engine, advisor, and
//!   the per-control [`ActivityTally`] behind a single press/tick surface.
//!
//! ## Quick Start
//!
//! ```rust
//! use flipcount::time::SystemClock;
//! use flipcount::{ControlInput, ControlPanel};
//! use std::sync::Arc;
//!
//! // A panel with the default Mod-10 counter.
//! let mut panel = ControlPanel::new(Arc::new(SystemClock));
//!
//! // The user picks Up mode; the tick source steps the counter.
//! panel.press(ControlInput::Up);
//! for _ in 0..12 {
//!     panel.tick();
//! }
//! assert_eq!(panel.state().value, 2u32); // 12 mod 10
//!
//! // The AI control resolves to the most frequent recent choice.
//! let decision = panel.press(ControlInput::Ai).expect("AI press decides");
//! assert_eq!(decision.decided_mode, flipcount::Mode::Up);
//! println!("{} ({}%)", decision.reason, decision.confidence);
//! ```
//!
//! A wall-clock driver belongs outside this crate; see the companion
//! simulator for a deterministic one.

pub mod activity;
pub mod advisor;
pub mod circuit;
pub mod constants;
pub mod engine;
pub mod error;
pub mod mode;
pub mod panel;
pub mod time;
pub mod types;

pub use activity::ActivityTally;
pub use advisor::{Decision, ModeAdvisor};
pub use circuit::CircuitView;
pub use engine::{CounterEngine, CounterState};
pub use error::CounterError;
pub use mode::{ControlInput, Mode};
pub use panel::ControlPanel;
pub use time::mock_clock::MockClock;
pub use types::{Confidence, CounterValue, Modulus};
