//! Active buzzer driver.
//!
//! A dumb actuator: ON, hold, OFF.  The hold blocks; the alert sounds for
//! its full length before the loop does anything else.
//!
//! ## Safety contract
//!
//! [`Buzzer::silence`] is always attempted during teardown, so the pin is
//! left LOW even when the loop unwinds on a fault.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{OutputPort, Switch};
use crate::error::HardwareFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding,
}

pub struct Buzzer<O> {
    port: O,
    state: BuzzerState,
}

impl<O: OutputPort> Buzzer<O> {
    pub fn new(port: O) -> Self {
        Self {
            port,
            state: BuzzerState::Silent,
        }
    }

    /// Sound for `hold_ms`, blocking on `delay`, then switch off.
    pub fn sound(&mut self, hold_ms: u32, delay: &mut impl DelayNs) -> Result<(), HardwareFault> {
        self.port.write(Switch::On)?;
        self.state = BuzzerState::Sounding;
        delay.delay_ms(hold_ms);
        self.silence()
    }

    pub fn silence(&mut self) -> Result<(), HardwareFault> {
        self.port.write(Switch::Off)?;
        self.state = BuzzerState::Silent;
        Ok(())
    }

    /// Last successfully commanded state.
    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == BuzzerState::Sounding
    }

    pub fn release(&mut self) {
        self.port.release();
    }
}
