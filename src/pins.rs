//! Pin and bus assignments for the GlowRig acquisition head.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// I²C bus — LTR-390 light sensor + AW9523 expander
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// Both parts are rated for 400 kHz fast mode.
pub const I2C_FREQ_HZ: u32 = 400_000;
/// I2C controller index used for the sensor bus.
pub const I2C_PORT: i32 = 0;

// ---------------------------------------------------------------------------
// UV excitation LED (constant-current sink on the AW9523)
// ---------------------------------------------------------------------------

/// Expander pin (P0_n) that sinks the excitation LED.
pub const UV_LED_EXPANDER_PIN: u8 = 1;

// ---------------------------------------------------------------------------
// UART console — command input and telemetry output
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
