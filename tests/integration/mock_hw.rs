//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history without touching a real I2C bus.

use glowrig::app::ports::{IlluminationPort, LightSensorPort};
use glowrig::error::{IlluminationError, SensorError};
use glowrig::sensors::RawReading;

pub struct MockHardware {
    pub light_present: bool,
    pub lamp_present: bool,
    /// Reading served to every `read()` until changed.
    pub next_reading: RawReading,
    /// When set, `read()` fails with a bus fault.
    pub fail_reads: bool,
    /// Number of sensor reads taken.
    pub read_count: usize,
    /// Every lamp level commanded, in order (one per tick).
    pub levels: Vec<u8>,
    /// Every gain index pushed to the sensor.
    pub gain_calls: Vec<usize>,
    /// Every integration index pushed to the sensor.
    pub integration_calls: Vec<usize>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            light_present: true,
            lamp_present: true,
            next_reading: RawReading::Single(10_000),
            fail_reads: false,
            read_count: 0,
            levels: Vec::new(),
            gain_calls: Vec::new(),
            integration_calls: Vec::new(),
        }
    }

    /// The lamp level after the most recent tick.
    pub fn current_level(&self) -> u8 {
        self.levels.last().copied().unwrap_or(0)
    }

    pub fn all_ready(&self) -> bool {
        self.light_present && self.lamp_present
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl LightSensorPort for MockHardware {
    fn ready(&self) -> bool {
        self.light_present
    }

    fn read(&mut self) -> Result<RawReading, SensorError> {
        if self.fail_reads {
            return Err(SensorError::BusFault);
        }
        self.read_count += 1;
        Ok(self.next_reading)
    }

    fn set_gain(&mut self, index: usize) -> Result<(), SensorError> {
        self.gain_calls.push(index);
        Ok(())
    }

    fn set_integration(&mut self, index: usize) -> Result<(), SensorError> {
        self.integration_calls.push(index);
        Ok(())
    }
}

impl IlluminationPort for MockHardware {
    fn ready(&self) -> bool {
        self.lamp_present
    }

    fn set_level(&mut self, level: u8) -> Result<(), IlluminationError> {
        self.levels.push(level);
        Ok(())
    }
}
