//! Shared mutable context threaded through every state handler.
//!
//! `AcqContext` is the single struct that state handlers read from and
//! write to. It carries the tick timestamp, the run parameters, the
//! command drained from the console this tick, the latest decay signal,
//! and the commanded excitation level that the service applies to the
//! lamp after the engine runs.

use crate::app::commands::Command;
use crate::config::RigConfig;

// ---------------------------------------------------------------------------
// Run parameters
// ---------------------------------------------------------------------------

/// Durations governing one acquisition run. Immutable once CHARGE begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    /// How long the UV lamp charges the sample.
    pub charge_ms: u64,
    /// How long the decay is sampled afterwards.
    pub measure_ms: u64,
}

impl RunParams {
    /// Defaults used when no start command has ever been received.
    pub fn from_config(config: &RigConfig) -> Self {
        Self {
            charge_ms: u64::from(config.default_charge_secs) * 1000,
            measure_ms: u64::from(config.default_measure_secs) * 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// AcqContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct AcqContext {
    // -- Timing --
    /// Timestamp of the current tick. Written by the service before the
    /// engine runs; handlers only read it.
    pub now_ms: u64,
    /// Timestamp at which the current phase was entered. Stamped by the
    /// engine on every transition; while in MEASURE this is the measure
    /// start that telemetry reports.
    pub phase_start_ms: u64,

    // -- Run state --
    /// Active run durations.
    pub params: RunParams,
    /// Command drained from the console this tick, if any. The handler of
    /// the phase that accepts it consumes it; the service clears whatever
    /// is left at the end of the tick.
    pub pending: Option<Command>,
    /// Most recent derived signal taken during MEASURE.
    pub last_signal: u32,

    // -- Actuator output --
    /// Commanded lamp level. Applied to the illumination channel by the
    /// service after the engine runs.
    pub excitation_level: u8,

    // -- Configuration --
    pub config: RigConfig,
}

impl AcqContext {
    /// Create a new context with the given configuration.
    pub fn new(config: RigConfig) -> Self {
        Self {
            now_ms: 0,
            phase_start_ms: 0,
            params: RunParams::from_config(&config),
            pending: None,
            last_signal: 0,
            excitation_level: 0,
            config,
        }
    }

    /// Milliseconds elapsed since the current phase was entered.
    pub fn elapsed_in_phase(&self) -> u64 {
        self.now_ms.saturating_sub(self.phase_start_ms)
    }

    /// Consume a pending start command, if one is queued.
    pub fn take_start(&mut self) -> Option<RunParams> {
        match self.pending {
            Some(Command::Start {
                charge_ms,
                measure_ms,
            }) => {
                self.pending = None;
                Some(RunParams {
                    charge_ms,
                    measure_ms,
                })
            }
            _ => None,
        }
    }

    /// Consume a pending stop command. Returns `true` if one was queued.
    pub fn take_stop(&mut self) -> bool {
        if matches!(self.pending, Some(Command::Stop)) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
