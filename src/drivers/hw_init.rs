//! One-shot hardware peripheral initialization.
//!
//! Configures the I2C master bus shared by the LTR-390 sensor and the
//! AW9523 expander using raw ESP-IDF sys calls, and exposes the small
//! register-transfer helpers the drivers build on. Called once from
//! `main()` before the control loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization and bus transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    I2cInitFailed(i32),
    I2cTxFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cInitFailed(rc) => write!(f, "I2C master init failed (rc={})", rc),
            Self::I2cTxFailed(rc) => write!(f, "I2C transfer failed (rc={})", rc),
        }
    }
}

// ── Bus bring-up ──────────────────────────────────────────────

/// Timeout for a single register transfer, in RTOS ticks.
#[cfg(target_os = "espidf")]
const I2C_TIMEOUT_TICKS: u32 = 100;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_i2c()?;
    }
    info!("hw_init: I2C master configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let mut cfg = i2c_config_t::default();
    cfg.mode = i2c_mode_t_I2C_MODE_MASTER;
    cfg.sda_io_num = pins::I2C_SDA_GPIO;
    cfg.scl_io_num = pins::I2C_SCL_GPIO;
    cfg.sda_pullup_en = true;
    cfg.scl_pullup_en = true;
    // SAFETY: selecting the master variant of the bindgen clock union.
    unsafe {
        cfg.__bindgen_anon_1.master.clk_speed = pins::I2C_FREQ_HZ;
    }

    let ret = unsafe { i2c_param_config(pins::I2C_PORT, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }

    let ret = unsafe { i2c_driver_install(pins::I2C_PORT, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }

    Ok(())
}

// ── Register transfer helpers ─────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn i2c_write_reg(addr: u8, reg: u8, value: u8) -> Result<(), HwInitError> {
    let buf = [reg, value];
    // SAFETY: The I2C driver is installed once in init_i2c() before any
    // transfer; access is main-loop only.
    let ret = unsafe {
        i2c_master_write_to_device(
            pins::I2C_PORT,
            addr,
            buf.as_ptr(),
            buf.len(),
            I2C_TIMEOUT_TICKS,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cTxFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write_reg(_addr: u8, _reg: u8, _value: u8) -> Result<(), HwInitError> {
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn i2c_read_reg(addr: u8, reg: u8) -> Result<u8, HwInitError> {
    let mut value = 0u8;
    // SAFETY: see i2c_write_reg.
    let ret = unsafe {
        i2c_master_write_read_device(
            pins::I2C_PORT,
            addr,
            &reg,
            1,
            &mut value,
            1,
            I2C_TIMEOUT_TICKS,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cTxFailed(ret));
    }
    Ok(value)
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_read_reg(_addr: u8, _reg: u8) -> Result<u8, HwInitError> {
    Ok(0)
}

#[cfg(target_os = "espidf")]
pub fn i2c_read_burst(addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), HwInitError> {
    // SAFETY: see i2c_write_reg.
    let ret = unsafe {
        i2c_master_write_read_device(
            pins::I2C_PORT,
            addr,
            &reg,
            1,
            buf.as_mut_ptr(),
            buf.len(),
            I2C_TIMEOUT_TICKS,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cTxFailed(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_read_burst(_addr: u8, _reg: u8, buf: &mut [u8]) -> Result<(), HwInitError> {
    buf.fill(0);
    Ok(())
}
