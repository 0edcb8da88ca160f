//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the control loop stalls — a wedged I2C transfer
//! during a 400 ms integration read is the realistic failure mode here.
//! The main loop must call `feed()` on every tick iteration.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Loop-stall budget before the TWDT panics the device. Comfortably above
/// the slowest sensor conversion plus a full tick.
#[cfg(target_os = "espidf")]
const TIMEOUT_MS: u32 = 8_000;

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: TIMEOUT_MS,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!(
                        "TWDT reconfigure returned {} (may already be configured)",
                        ret
                    );
                }

                let subscribed = esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK;
                if subscribed {
                    log::info!("Watchdog: subscribed ({} ms, panic on trigger)", TIMEOUT_MS);
                } else {
                    log::warn!("Watchdog: failed to subscribe");
                }

                Self { subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op");
            Self {}
        }
    }

    /// Feed the watchdog. Must be called at least once per timeout window.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
