//! Outbound telemetry records and their wire format.
//!
//! One record per control tick, rendered as six comma-separated fields:
//!
//! ```text
//! timestampMs,measureStartMs,signal,gainIndex,integrationIndex,PHASE
//! ```
//!
//! Outside MEASURE the four numeric mid-fields are zero; the record then
//! only carries the clock and the phase label. Records are append-only —
//! never mutated after emission.

use core::fmt::Write;

use crate::acquisition::Phase;
use crate::control::ranging::RangeSetting;

/// Rendered line budget: three u64 fields at worst plus indices, commas,
/// label, and newline.
pub const MAX_RECORD_LEN: usize = 96;

/// A point-in-time telemetry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryRecord {
    pub timestamp_ms: u64,
    pub measure_start_ms: u64,
    pub signal: u32,
    pub gain_index: u32,
    pub integration_index: u32,
    pub phase: Phase,
}

impl TelemetryRecord {
    /// Record for a tick spent measuring.
    pub fn measuring(
        timestamp_ms: u64,
        measure_start_ms: u64,
        signal: u32,
        setting: RangeSetting,
    ) -> Self {
        Self {
            timestamp_ms,
            measure_start_ms,
            signal,
            gain_index: setting.gain_index as u32,
            integration_index: setting.integration_index as u32,
            phase: Phase::Measure,
        }
    }

    /// Record for any tick outside MEASURE: numeric fields are zero.
    pub fn quiescent(timestamp_ms: u64, phase: Phase) -> Self {
        Self {
            timestamp_ms,
            measure_start_ms: 0,
            signal: 0,
            gain_index: 0,
            integration_index: 0,
            phase,
        }
    }

    /// Render the fixed six-field line, newline-terminated.
    pub fn render(&self) -> heapless::String<MAX_RECORD_LEN> {
        let mut line = heapless::String::new();
        // The budget above covers the widest possible field values.
        let _ = writeln!(
            line,
            "{},{},{},{},{},{}",
            self.timestamp_ms,
            self.measure_start_ms,
            self.signal,
            self.gain_index,
            self.integration_index,
            self.phase.label()
        );
        line
    }
}
