//! Outbound application events.
//!
//! The [`DetectionCoordinator`](super::service::DetectionCoordinator) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them: log to the console,
//! collect them in a test, etc.

use core::time::Duration;

use crate::error::{HardwareFault, NotifyError};

/// Structured events emitted by the detection core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The polling loop has started.
    Started {
        sensor_pin: u8,
        buzzer_pin: u8,
        poll_interval: Duration,
        cooldown: Duration,
    },

    /// Poll tick with no metal in range.
    AreaClear,

    /// Metal in range but the previous alert is too recent.
    CooldownActive { remaining: Duration },

    /// A qualifying detection; the alert sequence is starting.
    MetalDetected,

    /// The alert message was delivered.
    NotificationSent,

    /// The alert message could not be delivered.  Not retried.
    NotificationFailed(NotifyError),

    /// The sensor could not be read this tick.
    SensorReadFailed(HardwareFault),

    /// Cancellation was observed; teardown is starting.
    ShutdownRequested,

    /// Both ports were driven safe and released.
    HardwareReleased,

    /// The loop has stopped.  Carries the final counters.
    Stopped(CoordinatorStats),
}

/// Running counters kept by the coordinator.  In-memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorStats {
    pub polls: u64,
    pub alerts: u64,
    pub suppressed: u64,
    pub notify_failures: u64,
    pub read_failures: u64,
}
