//! Unified error types for the detection system.
//!
//! Three families, matching how the coordinator treats them:
//!
//! | Family          | Raised by                   | Coordinator policy          |
//! |-----------------|-----------------------------|-----------------------------|
//! | `HardwareFault` | GPIO ports, pin setup       | read: skip tick; write: fatal |
//! | `NotifyError`   | Notifier transports         | log, count, never retry     |
//! | `ConfigError`   | `DetectorConfig::validate`  | reject before start         |
//!
//! Cancellation is not an error and has no variant here.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible public operation in the crate funnels into this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("hardware: {0}")]
    Hardware(#[from] HardwareFault),
    #[error("notify: {0}")]
    Notify(#[from] NotifyError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Hardware faults
// ---------------------------------------------------------------------------

/// A digital port could not be set up, read, or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardwareFault {
    /// GPIO read returned an error.
    #[error("GPIO {pin} read failed: {detail}")]
    ReadFailed { pin: u8, detail: String },
    /// GPIO write returned an error.
    #[error("GPIO {pin} write failed: {detail}")]
    WriteFailed { pin: u8, detail: String },
    /// The port was used after it had been released.
    #[error("GPIO {pin} used after release")]
    Released { pin: u8 },
    /// Peripheral initialisation failed.
    #[error("GPIO init failed: {0}")]
    Init(String),
}

// ---------------------------------------------------------------------------
// Notification errors
// ---------------------------------------------------------------------------

/// Failure delivering an alert message.  Always transient from the
/// coordinator's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// Network-level failure (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The remote API answered but refused the message.
    #[error("API rejected message (HTTP {status}): {description}")]
    Api { status: u16, description: String },
    /// The delivery worker is no longer running.
    #[error("delivery worker unavailable")]
    WorkerUnavailable,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),
}
