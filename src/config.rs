//! Acquisition rig configuration parameters
//!
//! All tunable parameters for a GlowRig measurement head. Compiled-in
//! defaults only — the rig is reconfigured by reflashing, not at runtime.

use serde::{Deserialize, Serialize};

/// Core rig configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfig {
    // --- Excitation ---
    /// UV LED drive level during CHARGE (0-255 expander dim steps).
    /// 138 ≈ 20 mA through the excitation LED.
    pub excitation_level: u8,

    // --- Run defaults ---
    /// Charge duration used when no start command has ever been received (seconds)
    pub default_charge_secs: u32,
    /// Measure duration used when no start command has ever been received (seconds)
    pub default_measure_secs: u32,

    // --- Auto-ranging ---
    /// Minimum time between sensitivity changes (milliseconds)
    pub range_cooldown_ms: u64,
    /// Signal floor as a percentage of sensor full scale
    pub range_low_percent: u8,
    /// Signal ceiling as a percentage of sensor full scale
    pub range_high_percent: u8,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub tick_interval_ms: u64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            // Excitation
            excitation_level: 138,

            // Run defaults
            default_charge_secs: 5,
            default_measure_secs: 30,

            // Auto-ranging
            range_cooldown_ms: 1000,
            range_low_percent: 5,
            range_high_percent: 90,

            // Timing
            tick_interval_ms: 100, // 10 Hz
        }
    }
}
