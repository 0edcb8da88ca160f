//! Integration tests for the auto-ranging loop as driven by the service.
//!
//! Verifies that range decisions made during MEASURE are pushed to the
//! sensor port one axis at a time, honoring the cooldown, and that the
//! walk parks at the table extremes without oscillating.

use crate::mock_hw::MockHardware;

use glowrig::acquisition::Phase;
use glowrig::app::service::AcqService;
use glowrig::config::RigConfig;
use glowrig::sensors::light::{CONVERSION_TIME_MS, GAIN_STEPS};
use glowrig::sensors::RawReading;

fn measuring_service(hw: &mut MockHardware) -> AcqService {
    let mut svc = AcqService::new(RigConfig::default());
    svc.start();
    svc.handle_line("start 0 3600");
    svc.advance(0, true, hw);
    svc.advance(1, true, hw); // -> Measure
    assert_eq!(svc.phase(), Phase::Measure);
    svc
}

#[test]
fn bright_signal_steps_gain_down_then_integration() {
    let mut hw = MockHardware::new();
    hw.next_reading = RawReading::Single(60_000); // above the 58981 ceiling
    let mut svc = measuring_service(&mut hw);

    // From the boot setting (gain 1, integration 1): gain absorbs the
    // first step, integration the second, one cooldown apart.
    svc.advance(1500, true, &mut hw);
    assert_eq!(hw.gain_calls, vec![0]);
    assert!(hw.integration_calls.is_empty());

    svc.advance(2600, true, &mut hw);
    assert_eq!(hw.integration_calls, vec![0]);

    // Both axes floored: the signal stays clipped, nothing more happens.
    for t in [3700, 4800, 5900] {
        svc.advance(t, true, &mut hw);
    }
    assert_eq!(hw.gain_calls, vec![0]);
    assert_eq!(hw.integration_calls, vec![0]);

    let s = svc.range_setting();
    assert_eq!((s.gain_index, s.integration_index), (0, 0));
}

#[test]
fn dim_signal_stretches_integration_then_gain() {
    let mut hw = MockHardware::new();
    hw.next_reading = RawReading::Single(100); // below the 3276 floor
    let mut svc = measuring_service(&mut hw);

    let int_max = CONVERSION_TIME_MS.len() - 1;
    let gain_max = GAIN_STEPS.len() - 1;

    // Walk far enough to park both axes at maximum sensitivity.
    let mut t = 1500u64;
    for _ in 0..((int_max - 1) + (gain_max - 1) + 4) {
        svc.advance(t, true, &mut hw);
        t += 1100;
    }

    // Integration exhausted first, then gain — in table order.
    assert_eq!(hw.integration_calls, vec![2, 3, 4, 5]);
    assert_eq!(hw.gain_calls, vec![2, 3, 4]);

    let s = svc.range_setting();
    assert_eq!((s.gain_index, s.integration_index), (gain_max, int_max));
}

#[test]
fn cooldown_limits_pushes_to_one_per_window() {
    let mut hw = MockHardware::new();
    hw.next_reading = RawReading::Single(60_000);
    let mut svc = measuring_service(&mut hw);

    // Ten ticks inside a single cooldown window.
    for t in 1500..1510u64 {
        svc.advance(t, true, &mut hw);
    }
    assert_eq!(
        hw.gain_calls.len() + hw.integration_calls.len(),
        1,
        "at most one sensitivity change per cooldown window"
    );
}

#[test]
fn in_band_signal_never_touches_the_sensor_settings() {
    let mut hw = MockHardware::new();
    hw.next_reading = RawReading::Single(30_000);
    let mut svc = measuring_service(&mut hw);

    for t in (1500..20_000u64).step_by(500) {
        svc.advance(t, true, &mut hw);
    }
    assert!(hw.gain_calls.is_empty());
    assert!(hw.integration_calls.is_empty());
}

#[test]
fn dual_channel_readings_are_differenced_before_ranging() {
    let mut hw = MockHardware::new();
    // Broadband far above the ceiling, but the visible difference is not.
    hw.next_reading = RawReading::Dual {
        full: 60_000,
        ir: 40_000,
    };
    let mut svc = measuring_service(&mut hw);

    let record = svc.advance(1500, true, &mut hw);
    assert_eq!(record.signal, 20_000);
    assert!(hw.gain_calls.is_empty(), "in-band derived signal, no step");
}
