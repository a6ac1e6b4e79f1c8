//! GPIO pin assignments for the detector board (BCM numbering).
//!
//! Single source of truth for the defaults in
//! [`DetectorConfig`](crate::config::DetectorConfig).  Every value can be
//! overridden from the command line when the wiring differs.

use crate::app::ports::Polarity;

// ---------------------------------------------------------------------------
// Metal sensor (inductive proximity module, open-collector output)
// ---------------------------------------------------------------------------

/// Digital input: metal sensor output.
pub const METAL_SENSOR_GPIO: u8 = 26;

/// The sensor pulls its output LOW while metal is in range.
pub const SENSOR_POLARITY: Polarity = Polarity::ActiveLow;

// ---------------------------------------------------------------------------
// Buzzer (active buzzer behind a transistor, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = buzzer sounding.
pub const BUZZER_GPIO: u8 = 17;
