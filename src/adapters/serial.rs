//! Serial console adapter — line-buffered command input and telemetry
//! output.
//!
//! On ESP-IDF the console UART carries both directions: incoming bytes
//! are assembled into lines for the command interpreter, and one
//! telemetry record per tick is rendered, written, and flushed — no
//! batching, so an external observer sees phase transitions in real
//! time. On the host, lines are injected through a simulation queue.

use std::io::Write as _;

use crate::app::commands::MAX_LINE;
use crate::app::ports::{CommandSource, TelemetrySink};
use crate::app::telemetry::TelemetryRecord;

#[cfg(target_os = "espidf")]
use crate::pins;

/// UART controller behind the console.
#[cfg(target_os = "espidf")]
const UART_PORT: i32 = 0;

#[cfg(not(target_os = "espidf"))]
static SIM_RX: std::sync::Mutex<std::collections::VecDeque<heapless::String<MAX_LINE>>> =
    std::sync::Mutex::new(std::collections::VecDeque::new());

/// Queue a line as if the operator had typed it.
#[cfg(not(target_os = "espidf"))]
pub fn sim_push_line(line: &str) {
    let mut s = heapless::String::new();
    if s.push_str(line).is_ok() {
        if let Ok(mut q) = SIM_RX.lock() {
            q.push_back(s);
        }
    }
}

/// Line-buffered console over the firmware UART.
pub struct SerialConsole {
    buf: heapless::String<MAX_LINE>,
    /// Set while an oversize line is being discarded up to its terminator.
    overrun: bool,
}

impl Default for SerialConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialConsole {
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            // The RX side needs the UART driver; TX keeps going through
            // the console VFS.
            // SAFETY: one-shot install before the control loop starts.
            const RX_BUF_BYTES: i32 = 256;
            let ret = unsafe {
                esp_idf_svc::sys::uart_driver_install(
                    UART_PORT,
                    RX_BUF_BYTES,
                    0,
                    0,
                    core::ptr::null_mut(),
                    0,
                )
            };
            if ret != esp_idf_svc::sys::ESP_OK as i32 {
                log::warn!("console UART driver install returned {}", ret);
            }
            // SAFETY: same one-shot init path.
            let ret = unsafe {
                esp_idf_svc::sys::uart_set_pin(
                    UART_PORT,
                    pins::UART_TX_GPIO,
                    pins::UART_RX_GPIO,
                    -1,
                    -1,
                )
            };
            if ret != esp_idf_svc::sys::ESP_OK as i32 {
                log::warn!("console UART pin mux returned {}", ret);
            }
        }

        Self {
            buf: heapless::String::new(),
            overrun: false,
        }
    }

    /// Push one received byte into the line buffer. Returns a complete
    /// line when a terminator arrives.
    ///
    /// Oversize input drops the whole line rather than a prefix that
    /// might accidentally parse as a command.
    fn accept_byte(&mut self, byte: u8) -> Option<heapless::String<MAX_LINE>> {
        match byte {
            b'\n' | b'\r' => {
                let overrun = core::mem::take(&mut self.overrun);
                let line = core::mem::take(&mut self.buf);
                if line.is_empty() || overrun {
                    None
                } else {
                    Some(line)
                }
            }
            _ => {
                if self.buf.push(byte as char).is_err() {
                    self.overrun = true;
                }
                None
            }
        }
    }
}

// ── CommandSource implementation ──────────────────────────────

#[cfg(target_os = "espidf")]
impl CommandSource for SerialConsole {
    fn poll_line(&mut self) -> Option<heapless::String<MAX_LINE>> {
        let mut byte = 0u8;
        loop {
            // Zero-tick timeout: drain whatever is in the RX FIFO and
            // return without blocking the control loop.
            // SAFETY: driver installed in new(); single reader.
            let n = unsafe {
                esp_idf_svc::sys::uart_read_bytes(
                    UART_PORT,
                    core::ptr::from_mut(&mut byte).cast(),
                    1,
                    0,
                )
            };
            if n <= 0 {
                return None;
            }
            if let Some(line) = self.accept_byte(byte) {
                return Some(line);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl CommandSource for SerialConsole {
    fn poll_line(&mut self) -> Option<heapless::String<MAX_LINE>> {
        SIM_RX.lock().ok()?.pop_front()
    }
}

// ── TelemetrySink implementation ──────────────────────────────

impl TelemetrySink for SerialConsole {
    fn emit(&mut self, record: &TelemetryRecord) {
        let line = record.render();
        let mut out = std::io::stdout();
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }
}
