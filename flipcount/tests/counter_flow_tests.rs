//! Integration tests driving the full panel contract: mode presses, AI
//! resolution, modulus changes, resets, and the read-side views a front end
//! consumes.

mod common;

use common::{create_test_panel, create_test_panel_with_modulus, press_and_tick};
use flipcount::{ControlInput, Mode};

#[test]
fn up_session_counts_and_wraps() {
    let (mut panel, _clock) = create_test_panel_with_modulus(4);
    press_and_tick(&mut panel, ControlInput::Up, 6);

    let state = panel.state();
    assert_eq!(state.value, 2u32); // 6 mod 4
    assert_eq!(state.mode, Mode::Up);
    assert!(state.running);
    assert_eq!(state.ticks, 6);
}

#[test]
fn down_session_wraps_from_zero() {
    let (mut panel, _clock) = create_test_panel_with_modulus(10);
    press_and_tick(&mut panel, ControlInput::Down, 1);
    assert_eq!(panel.state().value, 9u32);
}

#[test]
fn mode_switch_mid_run_keeps_the_value() {
    let (mut panel, _clock) = create_test_panel();
    press_and_tick(&mut panel, ControlInput::Up, 3);
    press_and_tick(&mut panel, ControlInput::Down, 1);
    assert_eq!(panel.state().value, 2u32);
    assert_eq!(panel.state().mode, Mode::Down);
}

#[test]
fn reset_stops_ticks_deterministically() {
    let (mut panel, _clock) = create_test_panel();
    press_and_tick(&mut panel, ControlInput::ModuloN, 4);
    panel.reset();

    // Ticks after reset must not step the counter.
    for _ in 0..5 {
        panel.tick();
    }
    let state = panel.state();
    assert_eq!(state.value, 0u32);
    assert_eq!(state.mode, Mode::Idle);
    assert!(!state.running);
    assert_eq!(state.ticks, 0);
}

#[test]
fn modulus_change_mid_run_reshapes_the_cycle() {
    let (mut panel, _clock) = create_test_panel();
    press_and_tick(&mut panel, ControlInput::Up, 7);
    panel.set_modulus(3).unwrap();

    // Out-of-range value persists until the next tick recomputes it.
    assert_eq!(panel.state().value, 7u32);
    panel.tick();
    assert_eq!(panel.state().value, 2u32);
}

#[test]
fn invalid_modulus_requests_are_inert() {
    let (mut panel, _clock) = create_test_panel();
    press_and_tick(&mut panel, ControlInput::Up, 2);
    let before = panel.state();

    assert!(panel.set_modulus(0).is_err());
    assert!(panel.set_modulus(-17).is_err());
    assert_eq!(panel.state(), before);
}

#[test]
fn ai_follows_the_dominant_manual_choice() {
    let (mut panel, clock) = create_test_panel();
    clock.set_timestamp_label("09:15:00");

    // Matches the documented example: [Up, Up, Down, ModuloN, Up].
    panel.press(ControlInput::Up);
    panel.press(ControlInput::Up);
    panel.press(ControlInput::Down);
    panel.press(ControlInput::ModuloN);
    panel.press(ControlInput::Up);

    let decision = panel.press(ControlInput::Ai).expect("AI press decides");
    assert_eq!(decision.decided_mode, Mode::Up);
    assert_eq!(decision.confidence, 60u8);
    assert_eq!(decision.reason, "User performed 3 UP actions out of last 5");
    assert_eq!(decision.timestamp, "09:15:00");
    assert_eq!(panel.state().mode, Mode::Up);
}

#[test]
fn ai_presses_never_feed_the_learning_window() {
    let (mut panel, _clock) = create_test_panel();
    panel.press(ControlInput::Down);

    for _ in 0..4 {
        panel.press(ControlInput::Ai);
    }

    // One manual choice, four AI presses: window still holds just the one.
    assert_eq!(panel.recent_modes().collect::<Vec<_>>(), vec![Mode::Down]);
    assert_eq!(panel.tally().count(ControlInput::Ai), 4);
    assert_eq!(panel.decisions().count(), 4);
}

#[test]
fn window_eviction_is_fifo_over_manual_presses() {
    let (mut panel, _clock) = create_test_panel();
    let presses = [
        ControlInput::Up,
        ControlInput::Down,
        ControlInput::Up,
        ControlInput::ModuloN,
        ControlInput::Down,
        ControlInput::ModuloN,
    ];
    for press in presses {
        panel.press(press);
    }

    // Six presses through a five-slot window: the first Up is gone.
    assert_eq!(
        panel.recent_modes().collect::<Vec<_>>(),
        vec![
            Mode::Down,
            Mode::Up,
            Mode::ModuloN,
            Mode::Down,
            Mode::ModuloN
        ]
    );
}

#[test]
fn decision_log_retains_ten_newest_across_the_session() {
    let (mut panel, clock) = create_test_panel();
    panel.press(ControlInput::ModuloN);

    for i in 0..11 {
        clock.set_timestamp_label(format!("10:00:{:02}", i));
        panel.press(ControlInput::Ai);
    }

    let timestamps: Vec<String> = panel.decisions().map(|d| d.timestamp.clone()).collect();
    assert_eq!(timestamps.len(), 10);
    assert_eq!(timestamps.first().map(String::as_str), Some("10:00:10"));
    assert_eq!(timestamps.last().map(String::as_str), Some("10:00:01"));
}

#[test]
fn full_session_keeps_history_through_reset() {
    let (mut panel, _clock) = create_test_panel_with_modulus(8);
    press_and_tick(&mut panel, ControlInput::Up, 3);
    panel.press(ControlInput::Ai);
    panel.reset();
    press_and_tick(&mut panel, ControlInput::Down, 2);

    let state = panel.state();
    assert_eq!(state.value, 6u32); // fresh count-down from 0 under Mod-8
    assert_eq!(panel.tally().total(), 3);
    assert_eq!(panel.decisions().count(), 1);
    assert_eq!(
        panel.recent_modes().collect::<Vec<_>>(),
        vec![Mode::Up, Mode::Down]
    );
}

#[test]
fn circuit_view_matches_value_and_modulus() {
    let (mut panel, _clock) = create_test_panel_with_modulus(12);
    press_and_tick(&mut panel, ControlInput::Up, 9);

    let view = panel.circuit();
    assert_eq!(view.stages(), 4); // ceil(log2(12))
    assert_eq!(view.q_outputs(), &[true, false, false, true]); // 9 = 0b1001
}
