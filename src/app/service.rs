//! Detection coordinator: the hexagonal core.
//!
//! [`DetectionCoordinator`] owns the cooldown gate, the sensor, the buzzer,
//! the notifier, and the clock.  It exposes a hardware-agnostic polling
//! loop; all I/O flows through port traits, making the whole loop testable
//! on virtual time with mock adapters.
//!
//! ```text
//!  InputPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                │   DetectionCoordinator  │
//! OutputPort ◀── │  poll · cooldown · alert│ ──▶ Notifier
//!                └─────────────────────────┘
//! ```
//!
//! ## Loop lifecycle
//!
//! ```text
//!  Idle ──run()──▶ Running ──cancel / actuator fault──▶ ShuttingDown ──▶ Stopped
//! ```
//!
//! Cancellation is checked once per iteration, before the sensor read.
//! Teardown runs on every exit path and is idempotent.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::DetectorConfig;
use crate::drivers::buzzer::Buzzer;
use crate::error::{Error, HardwareFault};
use crate::sensors::metal::MetalSensor;

use super::cooldown::{CooldownGate, Decision};
use super::events::{AppEvent, CoordinatorStats};
use super::ports::{EventSink, InputPort, Notifier, OutputPort, TimePort};
use super::shutdown::ShutdownToken;

/// Lifecycle of the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, `run` not yet called.
    Idle,
    Running,
    ShuttingDown,
    Stopped,
}

// ───────────────────────────────────────────────────────────────
// DetectionCoordinator
// ───────────────────────────────────────────────────────────────

pub struct DetectionCoordinator<I, O, N, C> {
    config: DetectorConfig,
    gate: CooldownGate,
    sensor: MetalSensor<I>,
    buzzer: Buzzer<O>,
    notifier: N,
    clock: C,
    state: LoopState,
    stats: CoordinatorStats,
    released: bool,
}

impl<I, O, N, C> DetectionCoordinator<I, O, N, C>
where
    I: InputPort,
    O: OutputPort,
    N: Notifier,
    C: TimePort + DelayNs,
{
    /// Construct the coordinator.  Takes ownership of both ports; they are
    /// released by [`shutdown`](Self::shutdown) or when `run` returns.
    pub fn new(config: DetectorConfig, input: I, output: O, notifier: N, clock: C) -> Self {
        let gate = CooldownGate::new(config.cooldown());
        let sensor = MetalSensor::new(input, config.sensor_polarity);
        Self {
            config,
            gate,
            sensor,
            buzzer: Buzzer::new(output),
            notifier,
            clock,
            state: LoopState::Idle,
            stats: CoordinatorStats::default(),
            released: false,
        }
    }

    // ── Main loop ─────────────────────────────────────────────

    /// Poll until `cancel` is set or the buzzer faults.
    ///
    /// Returns `Ok(stats)` after a requested shutdown and `Err` on an
    /// actuator fault.  Both ports are released before either return.
    /// Once the ports are released the loop cannot restart; a later call
    /// returns `HardwareFault::Released` without polling.
    pub async fn run(
        &mut self,
        cancel: &ShutdownToken,
        sink: &mut impl EventSink,
    ) -> Result<CoordinatorStats, Error> {
        if self.released {
            return Err(HardwareFault::Released {
                pin: self.config.sensor_pin,
            }
            .into());
        }
        self.state = LoopState::Running;
        sink.emit(&AppEvent::Started {
            sensor_pin: self.config.sensor_pin,
            buzzer_pin: self.config.buzzer_pin,
            poll_interval: self.config.poll_interval(),
            cooldown: self.config.cooldown(),
        });
        info!(
            "Monitoring GPIO {} (buzzer GPIO {}, cooldown {:?})",
            self.config.sensor_pin,
            self.config.buzzer_pin,
            self.config.cooldown()
        );

        let poll_interval = self.config.poll_interval();
        let outcome = loop {
            if cancel.is_cancelled() {
                sink.emit(&AppEvent::ShutdownRequested);
                break Ok(());
            }
            if let Err(fault) = self.poll_once(sink).await {
                warn!("Actuator fault, stopping: {}", fault);
                break Err(fault);
            }
            self.clock.idle(poll_interval).await;
        };

        let teardown = self.shutdown(sink);
        match (outcome, teardown) {
            (Err(fault), _) | (Ok(()), Err(fault)) => Err(fault.into()),
            (Ok(()), Ok(())) => Ok(self.stats),
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll: read → evaluate → side effects.  No idle wait.
    ///
    /// Returns `Ok(None)` when the sensor read failed (the tick is
    /// skipped), and `Err` only when the buzzer could not be driven.
    pub async fn poll_once(
        &mut self,
        sink: &mut impl EventSink,
    ) -> Result<Option<Decision>, HardwareFault> {
        self.stats.polls += 1;

        let reading = match self.sensor.read() {
            Ok(r) => r,
            Err(e) => {
                self.stats.read_failures += 1;
                sink.emit(&AppEvent::SensorReadFailed(e));
                return Ok(None);
            }
        };

        // Sampled after the read so the window starts at the triggering read.
        let now = self.clock.now();
        let decision = self.gate.evaluate(reading, now);

        match decision {
            Decision::Idle => sink.emit(&AppEvent::AreaClear),
            Decision::Suppressed { remaining } => {
                self.stats.suppressed += 1;
                sink.emit(&AppEvent::CooldownActive { remaining });
            }
            Decision::Alert => {
                self.stats.alerts += 1;
                sink.emit(&AppEvent::MetalDetected);
                self.buzzer
                    .sound(self.config.buzzer_hold_ms, &mut self.clock)?;

                match self.notifier.send_message(&self.config.alert_message).await {
                    Ok(()) => sink.emit(&AppEvent::NotificationSent),
                    Err(e) => {
                        self.stats.notify_failures += 1;
                        sink.emit(&AppEvent::NotificationFailed(e));
                    }
                }
            }
        }

        Ok(Some(decision))
    }

    // ── Teardown ──────────────────────────────────────────────

    /// Drive the buzzer off and release both ports.
    ///
    /// Safe to call more than once; only the first call touches hardware.
    /// Both ports are released even if silencing the buzzer fails, and the
    /// silencing error is returned.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) -> Result<(), HardwareFault> {
        if self.released {
            return Ok(());
        }
        self.state = LoopState::ShuttingDown;

        let silenced = self.buzzer.silence();
        if let Err(e) = &silenced {
            warn!("Could not silence buzzer during teardown: {}", e);
        }
        self.buzzer.release();
        self.sensor.release();
        self.released = true;

        sink.emit(&AppEvent::HardwareReleased);
        self.state = LoopState::Stopped;
        sink.emit(&AppEvent::Stopped(self.stats));
        silenced
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> CoordinatorStats {
        self.stats
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}
