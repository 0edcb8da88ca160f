//! UV excitation LED driver (AW9523 constant-current sink).
//!
//! The excitation LED hangs off an AW9523 I2C expander pin switched to
//! LED mode; the pin's 8-bit dim register sets the sink current. A hard
//! cap keeps the drive below the LED's 25 mA current limit no matter
//! what level a caller asks for.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real expander registers through the hw_init I2C helpers.
//! On host/test: tracks state in-memory only.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::IlluminationError;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

/// Hard ceiling on the dim level: 172 ≈ 25 mA, the excitation LED's
/// current limit. 138 ≈ 20 mA is the nominal operating point.
pub const MAX_SAFE_LEVEL: u8 = 172;

#[cfg(target_os = "espidf")]
mod reg {
    pub const ADDR: u8 = 0x58;
    pub const CHIP_ID: u8 = 0x10;
    pub const CHIP_ID_VALUE: u8 = 0x23;
    /// LED-mode switch for port 0; a cleared bit puts the pin in LED mode.
    pub const LED_MODE_P0: u8 = 0x12;
    /// DIM register for P0_n is DIM_BASE_P0 + n.
    pub const DIM_BASE_P0: u8 = 0x24;
}

#[cfg(not(target_os = "espidf"))]
static SIM_PRESENT: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_present(present: bool) {
    SIM_PRESENT.store(present, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLedState {
    Off,
    On { level: u8 },
}

pub struct UvLed {
    state: UvLedState,
    detected: bool,
}

impl UvLed {
    pub fn new() -> Self {
        Self {
            state: UvLedState::Off,
            detected: false,
        }
    }

    /// One-shot power-on probe: chip-ID check, LED-mode switch, lamp dark.
    pub fn probe(&mut self) -> Result<(), IlluminationError> {
        self.detect()?;
        self.detected = true;
        self.set_level(0)
    }

    /// Readiness as established by [`probe`](Self::probe).
    pub fn is_ready(&self) -> bool {
        self.detected
    }

    /// Drive the LED at `level` (0 = dark), clamped to the current limit.
    pub fn set_level(&mut self, level: u8) -> Result<(), IlluminationError> {
        let level = level.min(MAX_SAFE_LEVEL);
        self.write_dim(level)?;
        self.state = if level == 0 {
            UvLedState::Off
        } else {
            UvLedState::On { level }
        };
        Ok(())
    }

    pub fn state(&self) -> UvLedState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        matches!(self.state, UvLedState::On { .. })
    }

    pub fn current_level(&self) -> u8 {
        match self.state {
            UvLedState::Off => 0,
            UvLedState::On { level } => level,
        }
    }

    // ── Target-specific register access ───────────────────────

    #[cfg(target_os = "espidf")]
    fn detect(&self) -> Result<(), IlluminationError> {
        let id = hw_init::i2c_read_reg(reg::ADDR, reg::CHIP_ID)
            .map_err(|_| IlluminationError::BusFault)?;
        if id != reg::CHIP_ID_VALUE {
            return Err(IlluminationError::NotDetected);
        }
        // All port-0 pins stay GPIO except the LED pin, which goes to
        // LED (current-sink) mode.
        let mode_mask = !(1u8 << pins::UV_LED_EXPANDER_PIN);
        hw_init::i2c_write_reg(reg::ADDR, reg::LED_MODE_P0, mode_mask)
            .map_err(|_| IlluminationError::BusFault)
    }

    #[cfg(not(target_os = "espidf"))]
    fn detect(&self) -> Result<(), IlluminationError> {
        if SIM_PRESENT.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(IlluminationError::NotDetected)
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_dim(&self, level: u8) -> Result<(), IlluminationError> {
        hw_init::i2c_write_reg(
            reg::ADDR,
            reg::DIM_BASE_P0 + pins::UV_LED_EXPANDER_PIN,
            level,
        )
        .map_err(|_| IlluminationError::BusFault)
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_dim(&self, _level: u8) -> Result<(), IlluminationError> {
        Ok(())
    }
}
