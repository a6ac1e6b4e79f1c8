//! Inductive metal sensor on a single digital input.
//!
//! The module's comparator output is read as a plain GPIO level.  Which
//! level means "metal present" depends on the module and the wiring, so it
//! is carried as a [`Polarity`] instead of being baked into the read.

use crate::app::cooldown::SensorReading;
use crate::app::ports::{InputPort, Polarity};
use crate::error::HardwareFault;

pub struct MetalSensor<I> {
    port: I,
    polarity: Polarity,
    last: Option<SensorReading>,
}

impl<I: InputPort> MetalSensor<I> {
    pub fn new(port: I, polarity: Polarity) -> Self {
        Self {
            port,
            polarity,
            last: None,
        }
    }

    pub fn read(&mut self) -> Result<SensorReading, HardwareFault> {
        let level = self.port.read_level()?;
        let reading = if level == self.polarity.active_level() {
            SensorReading::MetalPresent
        } else {
            SensorReading::Clear
        };
        self.last = Some(reading);
        Ok(reading)
    }

    /// Last successful reading, if any.
    pub fn last_reading(&self) -> Option<SensorReading> {
        self.last
    }

    pub fn release(&mut self) {
        self.port.release();
    }
}
