//! GlowRig Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single tick-driven control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter            SerialConsole       Monotonic-   │
//! │  (LightSensorPort +         (CommandSource +    Clock        │
//! │   IlluminationPort)          TelemetrySink)                  │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AcqService (pure logic)                   │  │
//! │  │  Acquisition FSM · Range Controller · Command parse    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Per tick: readiness check → drain one console line → advance the
//! acquisition machine → emit one telemetry record → feed the watchdog.

#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod acquisition;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod sensors;

mod pins;

pub mod adapters;
pub mod drivers;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{error, info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::serial::SerialConsole;
use adapters::time::MonotonicClock;
use app::ports::{CommandSource, TelemetrySink};
use app::service::AcqService;
use config::RigConfig;
use drivers::uv_led::UvLed;
use drivers::watchdog::Watchdog;
use sensors::light::Ltr390;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("GlowRig v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Bus init failure is critical — log and halt so the operator
        // sees a stable failure instead of a reboot loop.
        error!("I2C init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();
    let clock = MonotonicClock::new();

    // ── 3. Single power-on readiness probe ────────────────────
    let mut light = Ltr390::new();
    if let Err(e) = light.probe() {
        warn!("light sensor probe failed: {}", e);
    }
    let mut uv = UvLed::new();
    if let Err(e) = uv.probe() {
        warn!("UV LED probe failed: {}", e);
    }
    let mut hw = HardwareAdapter::new(light, uv);
    let mut console = SerialConsole::new();

    // ── 4. Application service ────────────────────────────────
    let config = RigConfig::default();
    let tick_ms = config.tick_interval_ms;
    let mut service = AcqService::new(config);
    service.start();

    info!("ready; send `start <charge_secs> <measure_secs>` or `stop`");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let now_ms = clock.now_ms();
        let ready = hw.hardware_ready();

        if ready {
            if let Some(line) = console.poll_line() {
                service.handle_line(&line);
            }
        } else {
            // Status line each tick; restoring the bus is outside the
            // core — no retries happen here.
            warn!("hardware unavailable; acquisition suspended");
        }

        let record = service.advance(now_ms, ready, &mut hw);
        console.emit(&record);

        watchdog.feed();
        std::thread::sleep(std::time::Duration::from_millis(tick_ms));
    }
}
