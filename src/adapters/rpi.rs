//! Raspberry Pi GPIO bring-up via `rppal`.
//!
//! Opens the sensor pin as an input and the buzzer pin as an output driven
//! LOW, then wraps both in the embedded-hal adapters.  rppal restores each
//! pin to its previous mode when the pin is dropped, which is what
//! `release()` relies on.

use log::info;
use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::adapters::gpio::{HalInput, HalOutput};
use crate::config::DetectorConfig;
use crate::error::HardwareFault;

/// Claim both pins named in `config`.
pub fn open_pins(
    config: &DetectorConfig,
) -> Result<(HalInput<InputPin>, HalOutput<OutputPin>), HardwareFault> {
    let gpio = Gpio::new().map_err(|e| HardwareFault::Init(e.to_string()))?;

    let sensor = gpio
        .get(config.sensor_pin)
        .map_err(|e| HardwareFault::Init(format!("GPIO {}: {}", config.sensor_pin, e)))?
        .into_input();

    let buzzer = gpio
        .get(config.buzzer_pin)
        .map_err(|e| HardwareFault::Init(format!("GPIO {}: {}", config.buzzer_pin, e)))?
        .into_output_low();

    info!(
        "rpi: GPIO {} input, GPIO {} output (low)",
        config.sensor_pin, config.buzzer_pin
    );

    Ok((
        HalInput::new(config.sensor_pin, sensor),
        HalOutput::new(config.buzzer_pin, buzzer),
    ))
}
