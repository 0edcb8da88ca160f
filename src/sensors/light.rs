//! LTR-390 ambient-light sensor driver.
//!
//! Reads the 20-bit ALS channel over I2C and exposes the gain and
//! resolution tables that the auto-ranging controller walks. Read
//! latency tracks the configured resolution: a longer conversion means a
//! longer blocking read, bounded by twice the conversion time.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: register access through the `hw_init` I2C helpers.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;
use crate::sensors::RawReading;

// ---------------------------------------------------------------------------
// Sensitivity tables (hardware-defined, ordered low → high sensitivity)
// ---------------------------------------------------------------------------

/// Analog gain multipliers, indexed by gain index.
pub const GAIN_STEPS: [u8; 5] = [1, 3, 6, 9, 18];
/// Boot-time gain: ×3.
pub const DEFAULT_GAIN_INDEX: usize = 1;

/// ADC resolution per integration index.
pub const RESOLUTION_BITS: [u8; 6] = [13, 16, 17, 18, 19, 20];
/// Conversion time per integration index (12.5 ms rounded up at the
/// fastest setting).
pub const CONVERSION_TIME_MS: [u64; 6] = [13, 25, 50, 100, 200, 400];
/// Boot-time resolution: 16-bit / 25 ms.
pub const DEFAULT_INTEGRATION_INDEX: usize = 1;

// ---------------------------------------------------------------------------
// Register map
// ---------------------------------------------------------------------------

#[cfg(target_os = "espidf")]
mod reg {
    pub const ADDR: u8 = 0x53;
    pub const MAIN_CTRL: u8 = 0x00;
    pub const ALS_MEAS_RATE: u8 = 0x04;
    pub const ALS_GAIN: u8 = 0x05;
    pub const PART_ID: u8 = 0x06;
    pub const MAIN_STATUS: u8 = 0x07;
    pub const ALS_DATA_0: u8 = 0x0D;

    /// Upper nibble of PART_ID for the LTR-390UV.
    pub const PART_ID_VALUE: u8 = 0xB0;
    /// MAIN_CTRL: ALS enabled, UVS mode off.
    pub const ALS_ENABLE: u8 = 0x02;
    /// MAIN_STATUS bit set when a fresh ALS conversion is available.
    pub const ALS_DATA_READY: u8 = 0x08;
}

// ---------------------------------------------------------------------------
// Host simulation hooks
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "espidf"))]
static SIM_ALS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_READY: AtomicBool = AtomicBool::new(true);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_als(raw: u32) {
    SIM_ALS.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_present(present: bool) {
    SIM_READY.store(present, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct Ltr390 {
    gain_index: usize,
    integration_index: usize,
    detected: bool,
}

impl Ltr390 {
    pub fn new() -> Self {
        Self {
            gain_index: DEFAULT_GAIN_INDEX,
            integration_index: DEFAULT_INTEGRATION_INDEX,
            detected: false,
        }
    }

    /// One-shot power-on probe: part-ID check, ALS enable, boot settings.
    pub fn probe(&mut self) -> Result<(), SensorError> {
        self.detect()?;
        self.detected = true;
        self.apply_gain()?;
        self.apply_meas_rate()?;
        Ok(())
    }

    /// Readiness as established by [`probe`](Self::probe).
    pub fn is_ready(&self) -> bool {
        self.detected
    }

    pub fn gain_index(&self) -> usize {
        self.gain_index
    }

    pub fn integration_index(&self) -> usize {
        self.integration_index
    }

    /// Conversion time of the currently configured resolution.
    pub fn conversion_time_ms(&self) -> u64 {
        CONVERSION_TIME_MS[self.integration_index]
    }

    pub fn set_gain_index(&mut self, index: usize) -> Result<(), SensorError> {
        if index >= GAIN_STEPS.len() {
            return Err(SensorError::InvalidSetting);
        }
        self.gain_index = index;
        self.apply_gain()
    }

    pub fn set_integration_index(&mut self, index: usize) -> Result<(), SensorError> {
        if index >= CONVERSION_TIME_MS.len() {
            return Err(SensorError::InvalidSetting);
        }
        self.integration_index = index;
        self.apply_meas_rate()
    }

    /// Take one ALS reading. Blocks for up to twice the configured
    /// conversion time waiting for the data-ready flag.
    pub fn read(&mut self) -> Result<RawReading, SensorError> {
        let raw = self.read_raw()?;
        Ok(RawReading::Single(raw))
    }

    // ── Target-specific register access ───────────────────────

    #[cfg(target_os = "espidf")]
    fn detect(&self) -> Result<(), SensorError> {
        let id = hw_init::i2c_read_reg(reg::ADDR, reg::PART_ID)
            .map_err(|_| SensorError::BusFault)?;
        if id & 0xF0 != reg::PART_ID_VALUE {
            return Err(SensorError::NotDetected);
        }
        hw_init::i2c_write_reg(reg::ADDR, reg::MAIN_CTRL, reg::ALS_ENABLE)
            .map_err(|_| SensorError::BusFault)
    }

    #[cfg(not(target_os = "espidf"))]
    fn detect(&self) -> Result<(), SensorError> {
        if SIM_READY.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(SensorError::NotDetected)
        }
    }

    #[cfg(target_os = "espidf")]
    fn apply_gain(&self) -> Result<(), SensorError> {
        // ALS_GAIN register encodes the gain index directly (0..=4).
        hw_init::i2c_write_reg(reg::ADDR, reg::ALS_GAIN, self.gain_index as u8)
            .map_err(|_| SensorError::BusFault)
    }

    #[cfg(not(target_os = "espidf"))]
    fn apply_gain(&self) -> Result<(), SensorError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn apply_meas_rate(&self) -> Result<(), SensorError> {
        // Resolution field (bits 6:4) counts down from 20-bit = 0, so the
        // register value is the table length minus one minus our index.
        // Measurement rate (bits 2:0) is pinned to 100 ms.
        let resolution = (CONVERSION_TIME_MS.len() - 1 - self.integration_index) as u8;
        let value = (resolution << 4) | 0x02;
        hw_init::i2c_write_reg(reg::ADDR, reg::ALS_MEAS_RATE, value)
            .map_err(|_| SensorError::BusFault)
    }

    #[cfg(not(target_os = "espidf"))]
    fn apply_meas_rate(&self) -> Result<(), SensorError> {
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&self) -> Result<u32, SensorError> {
        // Poll the data-ready flag; bound the wait at twice the conversion
        // time so a wedged sensor cannot stall the control loop forever.
        let budget_ms = self.conversion_time_ms() * 2;
        let mut waited_ms = 0u64;
        loop {
            let status = hw_init::i2c_read_reg(reg::ADDR, reg::MAIN_STATUS)
                .map_err(|_| SensorError::BusFault)?;
            if status & reg::ALS_DATA_READY != 0 {
                break;
            }
            if waited_ms >= budget_ms {
                return Err(SensorError::DataNotReady);
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
            waited_ms += 5;
        }

        let mut buf = [0u8; 3];
        hw_init::i2c_read_burst(reg::ADDR, reg::ALS_DATA_0, &mut buf)
            .map_err(|_| SensorError::BusFault)?;
        // 20-bit little-endian count.
        Ok(u32::from(buf[0]) | (u32::from(buf[1]) << 8) | (u32::from(buf[2] & 0x0F) << 16))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&self) -> Result<u32, SensorError> {
        Ok(SIM_ALS.load(Ordering::Relaxed))
    }
}
