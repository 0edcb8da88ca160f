//! Application service — the hexagonal core.
//!
//! [`AcqService`] owns the acquisition engine, its context, and the
//! range controller. It exposes a clean, hardware-agnostic API; all I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  LightSensorPort ──▶ ┌──────────────────────────┐
//!                      │        AcqService        │──▶ TelemetryRecord
//!  IlluminationPort ◀──│  Acquisition · Ranging   │
//!                      └──────────────────────────┘
//! ```
//!
//! Per-tick ordering discipline: commands before phase logic, phase
//! logic before telemetry.

use log::{info, warn};

use crate::acquisition::context::AcqContext;
use crate::acquisition::states::build_state_table;
use crate::acquisition::{Acquisition, Phase};
use crate::app::commands::{self, Command};
use crate::app::ports::{IlluminationPort, LightSensorPort};
use crate::app::telemetry::TelemetryRecord;
use crate::config::RigConfig;
use crate::control::ranging::{RangeController, RangeSetting};

// ───────────────────────────────────────────────────────────────
// AcqService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AcqService {
    acq: Acquisition,
    ctx: AcqContext,
    range: RangeController,
}

impl AcqService {
    /// Construct the service from configuration.
    ///
    /// Does **not** enter the initial phase — call [`start`](Self::start)
    /// next.
    pub fn new(config: RigConfig) -> Self {
        let range = RangeController::new(&config);
        let ctx = AcqContext::new(config);
        let acq = Acquisition::new(build_state_table(), Phase::Idle);
        Self { acq, ctx, range }
    }

    /// Run the initial phase entry. Call once before the first
    /// [`advance`](Self::advance).
    pub fn start(&mut self) {
        self.acq.start(&mut self.ctx);
        info!("AcqService started in {:?}", self.acq.current_phase());
    }

    // ── Command intake ────────────────────────────────────────

    /// Feed one console line through the command interpreter.
    ///
    /// Malformed lines are dropped silently; a parsed command is queued
    /// for the upcoming tick only.
    pub fn handle_line(&mut self, line: &str) {
        if let Some(cmd) = commands::parse_line(line) {
            info!("command accepted: {:?}", cmd);
            self.ctx.pending = Some(cmd);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: measurement/ranging step → phase step
    /// → lamp output → telemetry record.
    ///
    /// The `hw` parameter satisfies **both** hardware ports — this avoids
    /// a double mutable borrow while keeping the port boundary explicit.
    ///
    /// With `hardware_ready == false` every phase action and hardware
    /// access is suppressed except a best-effort lamp-off write; the
    /// returned record is zero-filled and holds the current phase while
    /// the machine waits out the outage.
    pub fn advance(
        &mut self,
        now_ms: u64,
        hardware_ready: bool,
        hw: &mut (impl LightSensorPort + IlluminationPort),
    ) -> TelemetryRecord {
        self.ctx.now_ms = now_ms;

        if !hardware_ready {
            self.ctx.excitation_level = 0;
            self.ctx.pending = None;
            let _ = hw.set_level(0);
            return TelemetryRecord::quiescent(now_ms, self.acq.current_phase());
        }

        // 1. Measurement step — only while measuring, and a pending stop
        //    skips it entirely (stop outranks the final reading).
        if self.acq.current_phase() == Phase::Measure && self.ctx.pending != Some(Command::Stop) {
            self.measure_step(hw);
        }

        // 2. Phase step (pure transition logic).
        self.acq.tick(&mut self.ctx);

        // 3. A command not consumed by its accepting phase dies here.
        self.ctx.pending = None;

        // 4. Apply the lamp output.
        if let Err(e) = hw.set_level(self.ctx.excitation_level) {
            warn!("lamp write failed: {e}");
        }

        // 5. One record per tick, reflecting the post-step phase.
        self.build_record()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current acquisition phase.
    pub fn phase(&self) -> Phase {
        self.acq.current_phase()
    }

    /// Current sensitivity table position.
    pub fn range_setting(&self) -> RangeSetting {
        self.range.setting()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Take one reading, derive the signal, and walk the range tables.
    /// A failed read keeps the previous signal and skips adjustment —
    /// readiness is the caller's concern, not retried here.
    fn measure_step(&mut self, hw: &mut impl LightSensorPort) {
        let raw = match hw.read() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("sensor read failed: {e}");
                return;
            }
        };
        let signal = raw.derived_signal();
        self.ctx.last_signal = signal;

        let before = self.range.setting();
        let after = self.range.adjust(signal, self.ctx.now_ms);
        // At most one axis moves per adjustment, so at most one push.
        if after.gain_index != before.gain_index {
            info!(
                "range: gain index {} -> {} (signal {})",
                before.gain_index, after.gain_index, signal
            );
            if let Err(e) = hw.set_gain(after.gain_index) {
                warn!("gain step failed: {e}");
            }
        } else if after.integration_index != before.integration_index {
            info!(
                "range: integration index {} -> {} (signal {})",
                before.integration_index, after.integration_index, signal
            );
            if let Err(e) = hw.set_integration(after.integration_index) {
                warn!("integration step failed: {e}");
            }
        }
    }

    fn build_record(&self) -> TelemetryRecord {
        let phase = self.acq.current_phase();
        if phase == Phase::Measure {
            TelemetryRecord::measuring(
                self.ctx.now_ms,
                self.ctx.phase_start_ms,
                self.ctx.last_signal,
                self.range.setting(),
            )
        } else {
            TelemetryRecord::quiescent(self.ctx.now_ms, phase)
        }
    }
}
