//! Common test utilities for counter integration tests.
//!
//! Shared helpers for creating panels with controllable clocks and for
//! driving scripted press/tick sequences.

#![allow(dead_code)] // Allow dead code for unused test helpers during development

use std::sync::Arc;

use flipcount::time::mock_clock::MockClock;
use flipcount::{ControlInput, ControlPanel, Modulus};

/// Creates a `ControlPanel` with a `MockClock` for deterministic decision
/// timestamps, using the default Mod-10 modulus.
pub fn create_test_panel() -> (ControlPanel, Arc<MockClock>) {
    let clock = Arc::new(MockClock::default());
    (ControlPanel::new(clock.clone()), clock)
}

/// Creates a `ControlPanel` with a `MockClock` and a specific modulus.
pub fn create_test_panel_with_modulus(modulus: u32) -> (ControlPanel, Arc<MockClock>) {
    let clock = Arc::new(MockClock::default());
    (
        ControlPanel::with_modulus(clock.clone(), Modulus::new(modulus)),
        clock,
    )
}

/// Presses a control and then applies `ticks` ticks.
pub fn press_and_tick(panel: &mut ControlPanel, input: ControlInput, ticks: usize) {
    panel.press(input);
    for _ in 0..ticks {
        panel.tick();
    }
}
