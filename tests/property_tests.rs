//! Property and fuzz-style tests for the lamp's pure logic.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use adaptilight::app::events::StatusRecord;
use adaptilight::control::{ModeController, OperatingMode};
use adaptilight::drivers::touch::debounce_accept;
use proptest::prelude::*;

// ── Brightness derivation ─────────────────────────────────────

proptest! {
    /// Adaptive output is inversely monotone in the ambient reading:
    /// a darker room never gets a dimmer LED than a brighter one.
    #[test]
    fn adaptive_brightness_is_monotone_non_increasing(
        a in 0u16..=4095u16,
        b in 0u16..=4095u16,
    ) {
        let ctl = ModeController::new();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            ctl.compute_brightness(lo) >= ctl.compute_brightness(hi),
            "brightness must not increase with ambient light"
        );
    }

    /// Out-of-range readings clamp to full scale instead of wrapping.
    #[test]
    fn adaptive_brightness_handles_any_u16(reading in any::<u16>()) {
        let ctl = ModeController::new();
        let level = ctl.compute_brightness(reading);
        if reading >= 4095 {
            prop_assert_eq!(level, 0);
        }
        // No assertion on the in-range value here beyond not panicking;
        // the exact endpoints are pinned by unit tests.
    }

    /// Fixed modes ignore the sensor entirely.
    #[test]
    fn fixed_modes_ignore_ambient_reading(reading in any::<u16>()) {
        let mut ctl = ModeController::new();
        for (token, expected) in [("dim", 50u8), ("read", 150), ("full", 255), ("off", 0)] {
            ctl.apply_remote_command(token);
            prop_assert_eq!(ctl.compute_brightness(reading), expected);
        }
    }
}

// ── Mode cycling ──────────────────────────────────────────────

proptest! {
    /// Touch cycling never lands on Off and is periodic with period 4,
    /// regardless of how the controller got to its current mode.
    #[test]
    fn touch_cycle_excludes_off_and_has_period_four(
        tokens in proptest::collection::vec(
            prop_oneof![
                Just("adaptive"), Just("dim"), Just("read"),
                Just("full"), Just("off"), Just("garbage"),
            ],
            0..=10,
        ),
    ) {
        let mut ctl = ModeController::new();
        for t in &tokens {
            ctl.apply_remote_command(t);
        }

        // First touch lands somewhere inside the 4-mode cycle.
        ctl.cycle_mode();
        let first = ctl.mode();
        prop_assert_ne!(first, OperatingMode::Off);

        for _ in 0..4 {
            ctl.cycle_mode();
            prop_assert_ne!(ctl.mode(), OperatingMode::Off);
        }
        prop_assert_eq!(ctl.mode(), first, "cycle must repeat every 4 touches");
    }

    /// Unrecognized command strings never change the mode.
    #[test]
    fn unknown_tokens_are_no_ops(token in "[a-z]{1,16}") {
        prop_assume!(!matches!(
            token.as_str(),
            "adaptive" | "dim" | "read" | "full" | "off"
        ));
        let mut ctl = ModeController::new();
        let before = ctl.mode();
        prop_assert!(!ctl.apply_remote_command(&token));
        prop_assert_eq!(ctl.mode(), before);
    }
}

// ── Debounce guard ────────────────────────────────────────────

proptest! {
    /// The guard accepts exactly when the wrapping distance from the last
    /// accepted event exceeds the minimum interval.
    #[test]
    fn debounce_matches_wrapping_distance(
        now in any::<u32>(),
        last in any::<u32>(),
        min in 0u32..=10_000u32,
    ) {
        let expected = now.wrapping_sub(last) > min;
        prop_assert_eq!(debounce_accept(now, last, min), expected);
    }

    /// A second event inside the window is always rejected.
    #[test]
    fn events_inside_window_are_rejected(
        last in any::<u32>(),
        delta in 0u32..=500u32,
    ) {
        prop_assert!(!debounce_accept(last.wrapping_add(delta), last, 500));
    }
}

// ── Status record serialization ───────────────────────────────

proptest! {
    /// Any in-range status record survives a JSON round trip unchanged.
    #[test]
    fn status_record_json_round_trip(
        light in 0u16..=4095u16,
        brightness in any::<u8>(),
    ) {
        for mode in [
            OperatingMode::Adaptive,
            OperatingMode::Dim,
            OperatingMode::Read,
            OperatingMode::Full,
            OperatingMode::Off,
        ] {
            let record = StatusRecord::new(light, brightness, mode);
            let bytes = serde_json::to_vec(&record).unwrap();
            let back: StatusRecord = serde_json::from_slice(&bytes).unwrap();
            prop_assert_eq!(back, record);
        }
    }
}
