//! The mode advisor: history-windowed decision heuristic behind the AI control.
//!
//! `ModeAdvisor` keeps a sliding window of the last few manually chosen modes
//! and, on demand, recommends the most frequent one together with a
//! confidence score and a human-readable justification. There is no learning
//! beyond the frequency count; the "AI" is a deterministic rule, which keeps
//! every decision reproducible from the window contents alone.
//!
//! Two invariants matter here:
//! - Only direct user choices feed the window. Decisions the advisor itself
//!   produced are never recorded, so the learning signal cannot feed back
//!   on itself.
//! - The window and the decision log are bounded FIFO structures (capacities
//!   5 and 10); eviction is the only state transition besides append.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::{COLD_START_CONFIDENCE, DECISION_LOG_CAP, MODE_HISTORY_WINDOW};
use crate::mode::Mode;
use crate::time::Clock;
use crate::types::Confidence;

/// One recommendation produced by [`ModeAdvisor::decide`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Human-readable capture time of the decision.
    pub timestamp: String,
    /// The recommended mode; always one of `Up`, `Down`, `ModuloN`.
    pub decided_mode: Mode,
    /// Justification referencing the tally that produced the decision.
    pub reason: String,
    /// Percentage share of the winning mode within the window.
    pub confidence: Confidence,
}

/// Converts a bounded window of past user choices into mode recommendations.
#[derive(Debug)]
pub struct ModeAdvisor {
    /// Sliding window of manual mode choices, oldest first.
    recent: VecDeque<Mode>,
    /// Retained decisions, most recent first.
    decisions: VecDeque<Decision>,
    /// Clock for decision timestamps.
    clock: Arc<dyn Clock>,
}

impl ModeAdvisor {
    /// Creates an advisor with an empty history.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            recent: VecDeque::with_capacity(MODE_HISTORY_WINDOW),
            decisions: VecDeque::with_capacity(DECISION_LOG_CAP),
            clock,
        }
    }

    /// Records a manually chosen mode into the learning window.
    ///
    /// Evicts the oldest entry once the window holds [`MODE_HISTORY_WINDOW`]
    /// modes. Callers must not feed AI-resolved selections back in; that is
    /// the contract that keeps the heuristic grounded in user behavior.
    ///
    /// # Parameters
    /// - `mode`: One of `Up`, `Down`, `ModuloN`. `Idle` is a caller error.
    pub fn record_choice(&mut self, mode: Mode) {
        debug_assert!(
            mode.is_counting(),
            "record_choice called with Idle; only chosen modes are recorded"
        );
        if !mode.is_counting() {
            return;
        }
        if self.recent.len() == MODE_HISTORY_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(mode);
    }

    /// Recommends a mode from the recent-usage window.
    ///
    /// The winner is the mode with the highest count in the window; ties
    /// resolve to whichever mode appears earliest in [`Mode::CANONICAL`],
    /// not by recency. Confidence is the winner's rounded percentage share.
    /// The resulting decision is pushed onto the front of the decision log,
    /// which is truncated to [`DECISION_LOG_CAP`] entries.
    ///
    /// With no history at all, recommends `Up` at [`COLD_START_CONFIDENCE`]
    /// without touching the log. The window itself is never mutated.
    ///
    /// # Returns
    /// The produced [`Decision`].
    pub fn decide(&mut self) -> Decision {
        if self.recent.is_empty() {
            return Decision {
                timestamp: self.clock.timestamp(),
                decided_mode: Mode::Up,
                reason: String::from("No usage history yet; defaulting to UP"),
                confidence: Confidence::new(COLD_START_CONFIDENCE),
            };
        }

        let window_len = self.recent.len();
        let counts: Vec<usize> = Mode::CANONICAL
            .iter()
            .map(|mode| self.recent.iter().filter(|m| *m == mode).count())
            .collect();
        let max = *counts.iter().max().unwrap_or(&0);
        let winner_index = counts
            .iter()
            .position(|count| *count == max)
            .unwrap_or_default();
        let winner = Mode::CANONICAL[winner_index];

        let decision = Decision {
            timestamp: self.clock.timestamp(),
            decided_mode: winner,
            reason: format!(
                "User performed {} {} actions out of last {}",
                max, winner, window_len
            ),
            confidence: Confidence::from_ratio(max, window_len),
        };

        self.decisions.push_front(decision.clone());
        self.decisions.truncate(DECISION_LOG_CAP);
        decision
    }

    /// The learning window, oldest choice first.
    pub fn recent_modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.recent.iter().copied()
    }

    /// Number of choices currently in the learning window.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.recent.len()
    }

    /// Retained decisions, most recent first.
    pub fn decisions(&self) -> impl Iterator<Item = &Decision> {
        self.decisions.iter()
    }

    /// Number of retained decisions.
    #[inline]
    pub fn decision_count(&self) -> usize {
        self.decisions.len()
    }
}
