//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Clear ticks arrive ten times a second, so they go
//! out at `debug`; everything an operator should see is `info` or `warn`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                sensor_pin,
                buzzer_pin,
                poll_interval,
                cooldown,
            } => {
                info!(
                    "START | sensor=GPIO{} buzzer=GPIO{} | poll={}ms | cooldown={:.1}s",
                    sensor_pin,
                    buzzer_pin,
                    poll_interval.as_millis(),
                    cooldown.as_secs_f32(),
                );
            }
            AppEvent::AreaClear => {
                debug!("CLEAR | no metal detected");
            }
            AppEvent::CooldownActive { remaining } => {
                info!(
                    "COOLDOWN | metal detected, {:.1}s remaining",
                    remaining.as_secs_f32()
                );
            }
            AppEvent::MetalDetected => {
                info!("ALERT | metal detected, sounding buzzer and notifying");
            }
            AppEvent::NotificationSent => {
                info!("NOTIFY | alert delivered");
            }
            AppEvent::NotificationFailed(e) => {
                warn!("NOTIFY | alert not delivered: {}", e);
            }
            AppEvent::SensorReadFailed(e) => {
                warn!("SENSOR | read failed, skipping tick: {}", e);
            }
            AppEvent::ShutdownRequested => {
                info!("STOP | shutdown requested");
            }
            AppEvent::HardwareReleased => {
                info!("STOP | GPIO released");
            }
            AppEvent::Stopped(s) => {
                info!(
                    "STOP | polls={} alerts={} suppressed={} notify_failures={} read_failures={}",
                    s.polls, s.alerts, s.suppressed, s.notify_failures, s.read_failures,
                );
            }
        }
    }
}
