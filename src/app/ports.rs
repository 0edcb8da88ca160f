//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AcqService (domain)
//! ```
//!
//! Driven adapters (the light sensor, the excitation LED, the serial
//! console) implement these traits. The
//! [`AcqService`](super::service::AcqService) consumes them via generics,
//! so the domain core never touches hardware directly. Both hardware
//! channels are owned exclusively by the controller for its lifetime —
//! no sharing, no pooling.

use crate::app::commands::MAX_LINE;
use crate::app::telemetry::TelemetryRecord;
use crate::error::{IlluminationError, SensorError};
use crate::sensors::RawReading;

// ───────────────────────────────────────────────────────────────
// Light sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to sample the decay and to walk
/// the sensitivity tables.
pub trait LightSensorPort {
    /// Readiness as established by the power-on probe.
    fn ready(&self) -> bool;

    /// Take one reading. Latency is bounded by the currently configured
    /// integration time.
    fn read(&mut self) -> Result<RawReading, SensorError>;

    /// Select a gain table entry.
    fn set_gain(&mut self, index: usize) -> Result<(), SensorError>;

    /// Select an integration-time table entry.
    fn set_integration(&mut self, index: usize) -> Result<(), SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Illumination port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the excitation lamp.
pub trait IlluminationPort {
    /// Readiness as established by the power-on probe.
    fn ready(&self) -> bool;

    /// Drive the lamp at `level` (0 = dark).
    fn set_level(&mut self, level: u8) -> Result<(), IlluminationError>;
}

// ───────────────────────────────────────────────────────────────
// Console ports (command input, telemetry output)
// ───────────────────────────────────────────────────────────────

/// Line-oriented command input. At most one line is drained per tick.
pub trait CommandSource {
    fn poll_line(&mut self) -> Option<heapless::String<MAX_LINE>>;
}

/// Telemetry output. One record per tick, written and flushed
/// immediately — no reordering, no batching.
pub trait TelemetrySink {
    fn emit(&mut self, record: &TelemetryRecord);
}
