//! Concrete phase handler functions and table builder.
//!
//! Each phase is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. The cycle is a single fixed pipeline:
//!
//! ```text
//!  IDLE ──[start cmd]──▶ CHARGE ──[charge_ms elapsed]──▶ MEASURE
//!    ▲                                                      │
//!    │                                  [stop cmd | measure_ms elapsed]
//!    │                                                      ▼
//!    └───────────────[next tick]─────────────────────────  DONE
//! ```
//!
//! The lamp is driven only while charging; every other entry action forces
//! it dark. DONE is a one-tick pass-through back to IDLE — no operator
//! acknowledgement is required between runs.

use super::context::AcqContext;
use super::{Phase, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; Phase::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: Phase::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Charge
        StateDescriptor {
            id: Phase::Charge,
            name: "Charge",
            on_enter: Some(charge_enter),
            on_exit: Some(charge_exit),
            on_update: charge_update,
        },
        // Index 2 — Measure
        StateDescriptor {
            id: Phase::Measure,
            name: "Measure",
            on_enter: Some(measure_enter),
            on_exit: None,
            on_update: measure_update,
        },
        // Index 3 — Done
        StateDescriptor {
            id: Phase::Done,
            name: "Done",
            on_enter: Some(done_enter),
            on_exit: None,
            on_update: done_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE — lamp dark, waiting for a start command
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut AcqContext) {
    ctx.excitation_level = 0;
    info!("IDLE: lamp dark, awaiting start command");
}

fn idle_update(ctx: &mut AcqContext) -> Option<Phase> {
    ctx.excitation_level = 0;

    if let Some(params) = ctx.take_start() {
        ctx.params = params;
        info!(
            "IDLE: run accepted (charge {} ms, measure {} ms)",
            params.charge_ms, params.measure_ms
        );
        return Some(Phase::Charge);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CHARGE — UV lamp on, depositing energy into the sample
// ═══════════════════════════════════════════════════════════════════════════

fn charge_enter(ctx: &mut AcqContext) {
    ctx.excitation_level = ctx.config.excitation_level;
    info!(
        "CHARGE: lamp at {} for {} ms",
        ctx.excitation_level, ctx.params.charge_ms
    );
}

fn charge_update(ctx: &mut AcqContext) -> Option<Phase> {
    // Re-asserted every tick so the lamp recovers after a transient
    // hardware-unavailable window forced it dark.
    ctx.excitation_level = ctx.config.excitation_level;

    if ctx.elapsed_in_phase() >= ctx.params.charge_ms {
        return Some(Phase::Measure);
    }

    None
}

fn charge_exit(ctx: &mut AcqContext) {
    ctx.excitation_level = 0;
    info!("CHARGE: lamp off after {} ms", ctx.elapsed_in_phase());
}

// ═══════════════════════════════════════════════════════════════════════════
//  MEASURE — lamp dark, sampling the decay; auto-ranging runs here
// ═══════════════════════════════════════════════════════════════════════════

fn measure_enter(ctx: &mut AcqContext) {
    // The signal slot must not leak a value from a previous run.
    ctx.last_signal = 0;
    info!("MEASURE: sampling decay for {} ms", ctx.params.measure_ms);
}

fn measure_update(ctx: &mut AcqContext) -> Option<Phase> {
    // Stop takes priority over measurement; the service skipped the
    // sensor read this tick when it saw the pending stop.
    if ctx.take_stop() {
        info!(
            "MEASURE: stop command after {} ms, ending run early",
            ctx.elapsed_in_phase()
        );
        return Some(Phase::Done);
    }

    if ctx.elapsed_in_phase() >= ctx.params.measure_ms {
        return Some(Phase::Done);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  DONE — one-tick pass-through back to IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn done_enter(ctx: &mut AcqContext) {
    ctx.excitation_level = 0;
    info!("DONE: run complete");
}

fn done_update(_ctx: &mut AcqContext) -> Option<Phase> {
    // Intentional: no hold state awaiting a command — the rig is ready
    // for the next run immediately.
    Some(Phase::Idle)
}
