//! Unified error types for the GlowRig firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling
//! uniform. All variants are `Copy` so they can be cheaply passed around
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The light sensor could not be read or configured.
    Sensor(SensorError),
    /// The excitation LED could not be commanded.
    Illumination(IlluminationError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Illumination(e) => write!(f, "illumination: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// I2C transaction with the sensor failed.
    BusFault,
    /// Part-ID probe did not find the sensor on the bus.
    NotDetected,
    /// Conversion did not complete within the expected window.
    DataNotReady,
    /// Requested gain or integration index is outside the hardware table.
    InvalidSetting,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFault => write!(f, "I2C bus fault"),
            Self::NotDetected => write!(f, "sensor not detected"),
            Self::DataNotReady => write!(f, "conversion not ready"),
            Self::InvalidSetting => write!(f, "setting index out of table"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Illumination errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IlluminationError {
    /// I2C write to the expander's dim register failed.
    BusFault,
    /// Chip-ID probe did not find the expander on the bus.
    NotDetected,
}

impl fmt::Display for IlluminationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFault => write!(f, "I2C bus fault"),
            Self::NotDetected => write!(f, "expander not detected"),
        }
    }
}

impl From<IlluminationError> for Error {
    fn from(e: IlluminationError) -> Self {
        Self::Illumination(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
