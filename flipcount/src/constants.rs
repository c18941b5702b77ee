//! Operational constants for the counter simulator.
//!
//! Defines the defaults and window sizes shared by the engine, the advisor,
//! and the driver. Component-specific tunables stay with their components.

use std::time::Duration;

/// Default `N` for Mod-N counting when no modulus has been configured.
pub const DEFAULT_MODULUS: u32 = 10;

/// Capacity of the sliding window of manually chosen modes the advisor
/// learns from. Oldest entries are evicted beyond this.
pub const MODE_HISTORY_WINDOW: usize = 5;

/// Maximum number of retained advisor decisions, most-recent-first.
pub const DECISION_LOG_CAP: usize = 10;

/// Confidence reported when the advisor decides without any usage history.
pub const COLD_START_CONFIDENCE: u8 = 50;

/// Interval between counter advances when driven by a wall-clock ticker.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_window_is_smaller_than_decision_log() {
        assert!(MODE_HISTORY_WINDOW < DECISION_LOG_CAP);
    }

    #[test]
    fn default_operational_params() {
        assert_eq!(DEFAULT_MODULUS, 10);
        assert_eq!(MODE_HISTORY_WINDOW, 5);
        assert_eq!(DECISION_LOG_CAP, 10);
        assert_eq!(COLD_START_CONFIDENCE, 50);
        assert_eq!(DEFAULT_TICK_INTERVAL, Duration::from_millis(500));
    }
}
