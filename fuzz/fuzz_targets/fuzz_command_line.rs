//! Fuzz the console line parser: arbitrary operator input must never
//! panic, and anything it accepts must be expressible in milliseconds.

#![no_main]

use libfuzzer_sys::fuzz_target;

use glowrig::app::commands::{parse_line, Command};

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = core::str::from_utf8(data) {
        if let Some(Command::Start {
            charge_ms,
            measure_ms,
        }) = parse_line(line)
        {
            assert_eq!(charge_ms % 1000, 0);
            assert_eq!(measure_ms % 1000, 0);
        }
    }
});
