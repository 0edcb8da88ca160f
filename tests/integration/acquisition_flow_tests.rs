//! Integration tests for the console → service → hardware pipeline.
//!
//! These drive [`AcqService`] tick by tick against the recording mock
//! and verify the full acquisition lifecycle: phase sequencing, lamp
//! windows, command phase policy, telemetry zeroing, and the
//! hardware-unavailable holding pattern.

use crate::mock_hw::MockHardware;

use glowrig::acquisition::Phase;
use glowrig::app::service::AcqService;
use glowrig::app::telemetry::TelemetryRecord;
use glowrig::config::RigConfig;

fn make_service() -> (AcqService, MockHardware) {
    let mut svc = AcqService::new(RigConfig::default());
    svc.start();
    (svc, MockHardware::new())
}

const EXCITATION: u8 = 138;

// ── Full run timeline ─────────────────────────────────────────

#[test]
fn full_run_timeline_start_2_5() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 2 5");
    let mut records = Vec::new();
    for t in 0..=7001u64 {
        records.push(svc.advance(t, true, &mut hw));
    }

    // t=0: immediate CHARGE, lamp lit.
    assert_eq!(records[0].phase, Phase::Charge);
    assert_eq!(hw.levels[0], EXCITATION);

    // Lamp stays lit for exactly the charge window.
    for t in 0..2000usize {
        assert_eq!(records[t].phase, Phase::Charge, "t={t}");
        assert_eq!(hw.levels[t], EXCITATION, "t={t}");
    }

    // t=2000: MEASURE begins, lamp dark, measure start stamped.
    assert_eq!(records[2000].phase, Phase::Measure);
    assert_eq!(records[2000].measure_start_ms, 2000);
    assert_eq!(records[2000].signal, 0, "no reading on the entry tick");
    assert_eq!(hw.levels[2000], 0);

    for t in 2001..7000usize {
        assert_eq!(records[t].phase, Phase::Measure, "t={t}");
        assert_eq!(records[t].measure_start_ms, 2000);
        assert_eq!(records[t].signal, 10_000);
        assert_eq!(hw.levels[t], 0, "t={t}");
    }

    // t=7000: DONE for exactly one tick, then IDLE.
    assert_eq!(records[7000].phase, Phase::Done);
    assert_eq!(records[7001].phase, Phase::Idle);

    // The final reading was still taken on the exit tick.
    assert_eq!(hw.read_count, 5000);
}

#[test]
fn records_outside_measure_are_zero_filled() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 1 1");
    let charge = svc.advance(0, true, &mut hw);
    assert_eq!(charge, TelemetryRecord::quiescent(0, Phase::Charge));

    svc.advance(1000, true, &mut hw); // -> Measure
    let done = svc.advance(2000, true, &mut hw);
    assert_eq!(done, TelemetryRecord::quiescent(2000, Phase::Done));

    let idle = svc.advance(2001, true, &mut hw);
    assert_eq!(idle, TelemetryRecord::quiescent(2001, Phase::Idle));
}

#[test]
fn measure_records_carry_the_range_setting() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 0 10");
    svc.advance(0, true, &mut hw);
    svc.advance(1, true, &mut hw); // -> Measure
    let r = svc.advance(2, true, &mut hw);

    assert_eq!(r.phase, Phase::Measure);
    assert_eq!(r.gain_index, svc.range_setting().gain_index as u32);
    assert_eq!(
        r.integration_index,
        svc.range_setting().integration_index as u32
    );
}

// ── Stop command ──────────────────────────────────────────────

#[test]
fn stop_mid_measure_forces_done_and_skips_the_read() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 1 60");
    svc.advance(0, true, &mut hw);
    svc.advance(1000, true, &mut hw); // -> Measure
    for t in 1001..1005u64 {
        svc.advance(t, true, &mut hw);
    }
    let reads_before = hw.read_count;

    svc.handle_line("stop");
    let record = svc.advance(1005, true, &mut hw);
    assert_eq!(record.phase, Phase::Done, "stop wins regardless of elapsed time");
    assert_eq!(hw.read_count, reads_before, "stop outranks the reading");

    let record = svc.advance(1006, true, &mut hw);
    assert_eq!(record.phase, Phase::Idle);
}

#[test]
fn stop_outside_measure_is_a_noop() {
    let (mut svc, mut hw) = make_service();

    // In IDLE.
    svc.handle_line("stop");
    svc.advance(0, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Idle);

    // In CHARGE — and the dropped stop must not linger into MEASURE.
    svc.handle_line("start 2 5");
    svc.advance(100, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);
    svc.handle_line("stop");
    svc.advance(200, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);

    svc.advance(2100, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Measure);
    svc.advance(2101, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Measure, "stale stop must not end the run");
}

// ── Start command policy ──────────────────────────────────────

#[test]
fn start_during_a_run_is_ignored() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 1 5");
    svc.advance(0, true, &mut hw);

    svc.handle_line("start 9 9");
    svc.advance(500, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);

    // The original durations still govern the run.
    svc.advance(1000, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Measure);
    svc.advance(6000, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Done);
}

#[test]
fn a_new_run_can_start_right_after_done() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 0 0");
    svc.advance(0, true, &mut hw); // Charge
    svc.advance(1, true, &mut hw); // Measure
    svc.advance(2, true, &mut hw); // Done
    svc.advance(3, true, &mut hw); // Idle

    svc.handle_line("start 1 1");
    svc.advance(4, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);
    assert_eq!(hw.current_level(), EXCITATION);
}

// ── Malformed input ───────────────────────────────────────────

#[test]
fn malformed_lines_are_noops_in_every_phase() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("go now");
    svc.advance(0, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Idle);
    assert_eq!(hw.current_level(), 0);

    svc.handle_line("start 2 5");
    svc.advance(1, true, &mut hw);
    svc.handle_line("sto p");
    svc.advance(2, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);
}

// ── Hardware-unavailable holding pattern ──────────────────────

#[test]
fn unavailable_hardware_suppresses_phase_logic_and_lamp() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 2 5");
    svc.advance(0, true, &mut hw);
    assert_eq!(hw.current_level(), EXCITATION);

    hw.light_present = false;
    let ready = hw.all_ready();
    assert!(!ready);

    let record = svc.advance(100, ready, &mut hw);
    assert_eq!(svc.phase(), Phase::Charge, "phase frozen during the outage");
    assert_eq!(record, TelemetryRecord::quiescent(100, Phase::Charge));
    assert_eq!(hw.current_level(), 0, "lamp forced dark while unavailable");

    // Readiness restored: the charge resumes and the lamp re-lights.
    hw.light_present = true;
    svc.advance(200, hw.all_ready(), &mut hw);
    assert_eq!(svc.phase(), Phase::Charge);
    assert_eq!(hw.current_level(), EXCITATION);

    svc.advance(2000, true, &mut hw);
    assert_eq!(svc.phase(), Phase::Measure);
}

#[test]
fn failed_reads_keep_the_previous_signal() {
    let (mut svc, mut hw) = make_service();

    svc.handle_line("start 0 60");
    svc.advance(0, true, &mut hw);
    svc.advance(1, true, &mut hw); // -> Measure

    let good = svc.advance(2, true, &mut hw);
    assert_eq!(good.signal, 10_000);

    hw.fail_reads = true;
    let record = svc.advance(3, true, &mut hw);
    assert_eq!(record.phase, Phase::Measure, "a bad read does not end the run");
    assert_eq!(record.signal, 10_000, "previous signal retained");
}
