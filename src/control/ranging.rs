//! Auto-ranging controller for the light sensor
//!
//! Walks the sensor's gain and integration-time tables one step at a time
//! to keep the decay signal between a fixed floor and ceiling. A cooldown
//! window rate-limits the walk: after a sensitivity change the hardware
//! must settle for at least one full conversion before the next reading
//! can be trusted for an adjustment decision.

use crate::config::RigConfig;
use crate::sensors::light;

/// Full scale of the sensor's 16-bit baseline resolution. The low/high
/// thresholds are fixed percentages of this value, not derived at runtime.
pub const FULL_SCALE: u32 = 65_535;

/// Current position in the sensitivity tables.
/// Higher index = higher sensitivity / longer integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSetting {
    pub gain_index: usize,
    pub integration_index: usize,
}

/// Auto-ranging controller
pub struct RangeController {
    setting: RangeSetting,
    /// Signal floor; below it sensitivity is stepped up.
    low: u32,
    /// Signal ceiling; above it sensitivity is stepped down.
    high: u32,
    cooldown_ms: u64,
    /// Timestamp of the most recent index change.
    last_adjust_ms: u64,
    gain_max: usize,
    integration_max: usize,
}

impl RangeController {
    pub fn new(config: &RigConfig) -> Self {
        Self {
            setting: RangeSetting {
                gain_index: light::DEFAULT_GAIN_INDEX,
                integration_index: light::DEFAULT_INTEGRATION_INDEX,
            },
            low: FULL_SCALE * u32::from(config.range_low_percent) / 100,
            high: FULL_SCALE * u32::from(config.range_high_percent) / 100,
            cooldown_ms: config.range_cooldown_ms,
            last_adjust_ms: 0,
            gain_max: light::GAIN_STEPS.len() - 1,
            integration_max: light::CONVERSION_TIME_MS.len() - 1,
        }
    }

    /// Current table position.
    pub fn setting(&self) -> RangeSetting {
        self.setting
    }

    /// Step the sensitivity toward the usable band, at most one index by
    /// one step per call, at most one change per cooldown window.
    ///
    /// Bright: gain steps down before integration — a gain step tames
    /// saturation faster than shortening an already-short integration
    /// window. Dim: integration stretches before gain rises. At the
    /// extreme of both axes in the needed direction the signal stays
    /// clipped/floored; that is a dynamic-range limit, not an error.
    pub fn adjust(&mut self, signal: u32, now_ms: u64) -> RangeSetting {
        if now_ms.saturating_sub(self.last_adjust_ms) < self.cooldown_ms {
            return self.setting;
        }

        if signal > self.high {
            if self.setting.gain_index > 0 {
                self.setting.gain_index -= 1;
                self.last_adjust_ms = now_ms;
            } else if self.setting.integration_index > 0 {
                self.setting.integration_index -= 1;
                self.last_adjust_ms = now_ms;
            }
        } else if signal < self.low {
            if self.setting.integration_index < self.integration_max {
                self.setting.integration_index += 1;
                self.last_adjust_ms = now_ms;
            } else if self.setting.gain_index < self.gain_max {
                self.setting.gain_index += 1;
                self.last_adjust_ms = now_ms;
            }
        }

        self.setting
    }
}
