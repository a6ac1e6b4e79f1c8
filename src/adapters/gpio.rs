//! embedded-hal GPIO adapter.
//!
//! Bridges any [`embedded_hal::digital::InputPin`] /
//! [`OutputPin`](embedded_hal::digital::OutputPin) to the domain
//! [`InputPort`] / [`OutputPort`] traits.  The platform crate (rppal on the
//! Pi, a mock in tests) only has to hand over configured pins.
//!
//! Releasing drops the underlying pin exactly once.  Platform pin types
//! restore the pin to its original mode on drop, which is the cleanup.

use embedded_hal::digital::{self, InputPin, OutputPin};
use log::debug;

use crate::app::ports::{InputPort, OutputPort, PinLevel, Switch};
use crate::error::HardwareFault;

fn describe(e: &impl digital::Error) -> String {
    format!("{:?}", e.kind())
}

// ── Input ─────────────────────────────────────────────────────

pub struct HalInput<P> {
    pin_number: u8,
    pin: Option<P>,
}

impl<P: InputPin> HalInput<P> {
    /// `pin` must already be configured as an input.
    pub fn new(pin_number: u8, pin: P) -> Self {
        Self {
            pin_number,
            pin: Some(pin),
        }
    }

    pub fn is_released(&self) -> bool {
        self.pin.is_none()
    }
}

impl<P: InputPin> InputPort for HalInput<P> {
    fn read_level(&mut self) -> Result<PinLevel, HardwareFault> {
        let pin_number = self.pin_number;
        let pin = self
            .pin
            .as_mut()
            .ok_or(HardwareFault::Released { pin: pin_number })?;
        match pin.is_high() {
            Ok(true) => Ok(PinLevel::High),
            Ok(false) => Ok(PinLevel::Low),
            Err(e) => Err(HardwareFault::ReadFailed {
                pin: pin_number,
                detail: describe(&e),
            }),
        }
    }

    fn release(&mut self) {
        if self.pin.take().is_some() {
            debug!("GPIO {} input released", self.pin_number);
        }
    }
}

// ── Output ────────────────────────────────────────────────────

pub struct HalOutput<P> {
    pin_number: u8,
    pin: Option<P>,
}

impl<P: OutputPin> HalOutput<P> {
    /// `pin` must already be configured as an output.
    pub fn new(pin_number: u8, pin: P) -> Self {
        Self {
            pin_number,
            pin: Some(pin),
        }
    }

    pub fn is_released(&self) -> bool {
        self.pin.is_none()
    }
}

impl<P: OutputPin> OutputPort for HalOutput<P> {
    fn write(&mut self, state: Switch) -> Result<(), HardwareFault> {
        let pin_number = self.pin_number;
        let pin = self
            .pin
            .as_mut()
            .ok_or(HardwareFault::Released { pin: pin_number })?;
        let result = match state {
            Switch::On => pin.set_high(),
            Switch::Off => pin.set_low(),
        };
        result.map_err(|e| HardwareFault::WriteFailed {
            pin: pin_number,
            detail: describe(&e),
        })
    }

    fn release(&mut self) {
        if self.pin.take().is_some() {
            debug!("GPIO {} output released", self.pin_number);
        }
    }
}
