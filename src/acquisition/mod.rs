//! Function-pointer acquisition state machine engine.
//!
//! Classic embedded FSM pattern expressed in Rust:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  StateTable                                             │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐ │
//! │  │ Phase   │ on_enter  │ on_exit  │ on_update         │ │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤ │
//! │  │ Idle    │ fn(ctx)   │          │ fn(ctx)->Option<> │ │
//! │  │ Charge  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │ │
//! │  │ Measure │ fn(ctx)   │          │ fn(ctx)->Option<> │ │
//! │  │ Done    │ fn(ctx)   │          │ fn(ctx)->Option<> │ │
//! │  └─────────┴───────────┴──────────┴───────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** phase.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! phase, stamps the phase-entry timestamp, then runs `on_enter` for the
//! next. All functions receive `&mut AcqContext`, which holds timing,
//! run parameters, the pending command, and the lamp output slot.
//!
//! Unlike a tick-counting engine, phase durations here are timestamp
//! deltas (`now_ms − phase_start_ms`), so the loop stays correct even
//! when a slow sensor integration stretches a tick.

pub mod context;
pub mod states;

use context::AcqContext;
use log::info;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Enumeration of the acquisition phases.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Idle = 0,
    Charge = 1,
    Measure = 2,
    Done = 3,
}

impl Phase {
    /// Total number of phases — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a `u8` index back to `Phase`. Panics on out-of-range in
    /// debug builds; returns `Idle` in release (safe fallback).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Charge,
            2 => Self::Measure,
            3 => Self::Done,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Idle
            }
        }
    }

    /// Wire label used in telemetry records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Charge => "CHARGE",
            Self::Measure => "MEASURE",
            Self::Done => "DONE",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each phase transition.
pub type StateActionFn = fn(&mut AcqContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut AcqContext) -> Option<Phase>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: Phase,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The acquisition state machine engine.
///
/// Owns the phase table (array of [`StateDescriptor`]) and advances one
/// phase step per [`tick`](Acquisition::tick) against a mutable
/// [`AcqContext`].
pub struct Acquisition {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [StateDescriptor; Phase::COUNT],
    /// Index of the currently active phase.
    current: usize,
}

impl Acquisition {
    /// Construct a new engine with the given table, starting in `initial`.
    pub fn new(table: [StateDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Run the initial `on_enter` for the starting phase.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut AcqContext) {
        info!("acquisition starting in {}", self.table[self.current].name);
        ctx.phase_start_ms = ctx.now_ms;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the machine by one tick.
    ///
    /// 1. Call `on_update` for the current phase.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → stamp `phase_start_ms` → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut AcqContext) {
        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// The current phase's identity.
    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: Phase, ctx: &mut AcqContext) {
        let next_idx = next_id as usize;

        info!(
            "phase transition: {} -> {} at {} ms",
            self.table[self.current].name, self.table[next_idx].name, ctx.now_ms
        );

        // Exit current phase
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        // Update pointer and reset the phase clock
        self.current = next_idx;
        ctx.phase_start_ms = ctx.now_ms;

        // Enter new phase
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
