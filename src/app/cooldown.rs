//! Cooldown gate: turns raw readings into rate-limited decisions.
//!
//! ```text
//!   reading == Clear                              ──▶ Idle
//!   reading == MetalPresent, cooldown running     ──▶ Suppressed { remaining }
//!   reading == MetalPresent, cooldown elapsed     ──▶ Alert  (last_alert_at = now)
//! ```
//!
//! There is no discrete "in cooldown" state: cooldown is a function of
//! elapsed time since `last_alert_at`.  The interval is open at the lower
//! bound, so elapsed == cooldown is still suppressed.

use core::time::Duration;

/// Interpreted sensor state for one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorReading {
    MetalPresent,
    Clear,
}

/// Outcome of [`CooldownGate::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing in range.
    Idle,
    /// Metal in range, but an alert fired less than `cooldown` ago.
    Suppressed { remaining: Duration },
    /// Metal in range and the gate is open.  The caller must run the alert.
    Alert,
}

/// Owns `last_alert_at` and the cooldown length.
#[derive(Debug, Clone)]
pub struct CooldownGate {
    cooldown: Duration,
    last_alert_at: Option<Duration>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_alert_at: None,
        }
    }

    /// Decide what a reading taken at `now` means.
    ///
    /// Returning [`Decision::Alert`] records `now` as the new
    /// `last_alert_at` in the same call, so no later evaluation inside the
    /// window can also alert.  `Idle` never touches the state.
    pub fn evaluate(&mut self, reading: SensorReading, now: Duration) -> Decision {
        if reading == SensorReading::Clear {
            return Decision::Idle;
        }

        if let Some(last) = self.last_alert_at {
            // A clock that went backwards counts as zero elapsed.
            let elapsed = now.saturating_sub(last);
            if elapsed <= self.cooldown {
                return Decision::Suppressed {
                    remaining: self.cooldown - elapsed,
                };
            }
        }

        self.last_alert_at = Some(now);
        Decision::Alert
    }

    /// Instant of the most recent alert, if any.
    pub fn last_alert_at(&self) -> Option<Duration> {
        self.last_alert_at
    }
}
