//! Port traits: the hexagonal boundary between detection logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DetectionCoordinator (domain)
//! ```
//!
//! Driven adapters (GPIO pins, clocks, notifiers, event sinks) implement
//! these traits.  The [`DetectionCoordinator`](super::service::DetectionCoordinator)
//! consumes them via generics, so the domain core never touches hardware
//! or the network directly.
//!
//! ## Release contract
//!
//! [`InputPort::release`] and [`OutputPort::release`] give the pin back to
//! the system.  They MUST be idempotent: a second call is a no-op.  Any
//! read or write after release fails with
//! [`HardwareFault::Released`](crate::error::HardwareFault::Released).

use core::future::Future;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HardwareFault, NotifyError};

// ───────────────────────────────────────────────────────────────
// Pin values
// ───────────────────────────────────────────────────────────────

/// Electrical level sampled from a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinLevel {
    High,
    Low,
}

/// Commanded state of a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

/// Which input level means "metal present".
///
/// Wiring-specific, so it lives in config rather than as an inverted
/// comparison in the sensor code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// LOW = metal present (open-collector sensors).
    ActiveLow,
    /// HIGH = metal present.
    ActiveHigh,
}

impl Polarity {
    /// The level that signals a detection under this polarity.
    pub const fn active_level(self) -> PinLevel {
        match self {
            Self::ActiveLow => PinLevel::Low,
            Self::ActiveHigh => PinLevel::High,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for a single digital input.
pub trait InputPort {
    /// Sample the current pin level.
    fn read_level(&mut self) -> Result<PinLevel, HardwareFault>;

    /// Return the pin to the system.  Idempotent.
    fn release(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for a single digital output.
pub trait OutputPort {
    /// Drive the pin.
    fn write(&mut self, state: Switch) -> Result<(), HardwareFault>;

    /// Return the pin to the system.  Idempotent.
    fn release(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Notifier port (driven adapter: domain → message transport)
// ───────────────────────────────────────────────────────────────

/// Outbound message delivery.
///
/// One attempt per call.  Implementations report failures; they do not
/// retry on the caller's behalf.
pub trait Notifier {
    fn send_message(&mut self, text: &str) -> impl Future<Output = Result<(), NotifyError>>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time and the cooperative wait between polls.
///
/// Blocking holds (the buzzer) go through
/// [`embedded_hal::delay::DelayNs`], which clock adapters implement
/// alongside this trait.
pub trait TimePort {
    /// Monotonic time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Suspend the loop for `period` without blocking the executor.
    fn idle(&mut self, period: Duration) -> impl Future<Output = ()>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The coordinator emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
