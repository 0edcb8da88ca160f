//! Hardware adapter — bridges the real peripherals to the domain ports.
//!
//! Owns the light sensor and the excitation LED drivers, exposing them
//! through [`LightSensorPort`] and [`IlluminationPort`]. This is the
//! only module in the system that hands actual hardware to the service;
//! on non-espidf targets the underlying drivers use cfg-gated
//! simulation stubs.

use crate::app::ports::{IlluminationPort, LightSensorPort};
use crate::drivers::uv_led::UvLed;
use crate::error::{IlluminationError, SensorError};
use crate::sensors::light::Ltr390;
use crate::sensors::RawReading;

/// Concrete adapter that combines both hardware channels behind the
/// port traits.
pub struct HardwareAdapter {
    light: Ltr390,
    uv: UvLed,
}

impl HardwareAdapter {
    pub fn new(light: Ltr390, uv: UvLed) -> Self {
        Self { light, uv }
    }

    /// Combined readiness of both capabilities, re-evaluated each tick
    /// by the main loop.
    pub fn hardware_ready(&self) -> bool {
        self.light.is_ready() && self.uv.is_ready()
    }
}

// ── LightSensorPort implementation ────────────────────────────

impl LightSensorPort for HardwareAdapter {
    fn ready(&self) -> bool {
        self.light.is_ready()
    }

    fn read(&mut self) -> Result<RawReading, SensorError> {
        self.light.read()
    }

    fn set_gain(&mut self, index: usize) -> Result<(), SensorError> {
        self.light.set_gain_index(index)
    }

    fn set_integration(&mut self, index: usize) -> Result<(), SensorError> {
        self.light.set_integration_index(index)
    }
}

// ── IlluminationPort implementation ───────────────────────────

impl IlluminationPort for HardwareAdapter {
    fn ready(&self) -> bool {
        self.uv.is_ready()
    }

    fn set_level(&mut self, level: u8) -> Result<(), IlluminationError> {
        self.uv.set_level(level)
    }
}
