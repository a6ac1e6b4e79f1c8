//! Integration tests for the sensor → cooldown → buzzer → notifier loop.
//!
//! Default timing throughout: 100 ms polls, 1 s buzzer hold, 5 s cooldown.
//! The virtual clock makes every instant exact.

use std::time::Duration;

use futures_lite::future::block_on;
use metal_sentry::app::cooldown::Decision;
use metal_sentry::app::events::AppEvent;
use metal_sentry::app::ports::{PinLevel, Polarity, Switch};
use metal_sentry::app::service::{DetectionCoordinator, LoopState};
use metal_sentry::app::shutdown::ShutdownToken;
use metal_sentry::config::{DEFAULT_ALERT_MESSAGE, DetectorConfig};
use metal_sentry::error::{HardwareFault, NotifyError};

use crate::mock_hw::{MockBuzzer, MockNotifier, RecordingSink, ScriptedSensor, VirtualClock};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn first_event_announces_pins_and_timing() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::High, 1, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock);

    block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(
        sink.events[0].1,
        AppEvent::Started {
            sensor_pin: 26,
            buzzer_pin: 17,
            poll_interval: ms(100),
            cooldown: ms(5000),
        }
    );
    assert!(matches!(sink.events.last(), Some((_, AppEvent::Stopped(_)))));
}

#[test]
fn alert_sounds_buzzer_then_sends_configured_message() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let buzzer = MockBuzzer::new();
    let notifier = MockNotifier::new();
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 1, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        buzzer.clone(),
        notifier.clone(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock.clone());

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(stats.alerts, 1);
    assert_eq!(*notifier.sent.borrow(), vec![DEFAULT_ALERT_MESSAGE.to_string()]);
    // On + Off for the alert, Off again at teardown.
    assert_eq!(
        buzzer.log.borrow().writes,
        vec![Switch::On, Switch::Off, Switch::Off]
    );

    // The notification goes out after the full 1 s hold.
    let sent_at = sink
        .events
        .iter()
        .find(|(_, e)| matches!(e, AppEvent::NotificationSent))
        .map(|(t, _)| *t);
    assert_eq!(sent_at, Some(ms(1000)));
}

#[test]
fn alert_suppress_alert_on_manual_clock() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 3, cancel);
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock.clone());

    assert_eq!(block_on(coordinator.poll_once(&mut sink)), Ok(Some(Decision::Alert)));

    clock.set(ms(3000));
    assert_eq!(
        block_on(coordinator.poll_once(&mut sink)),
        Ok(Some(Decision::Suppressed { remaining: ms(2000) }))
    );

    clock.set(ms(6000));
    assert_eq!(block_on(coordinator.poll_once(&mut sink)), Ok(Some(Decision::Alert)));
    assert_eq!(coordinator.gate().last_alert_at(), Some(ms(6000)));
    assert_eq!(coordinator.state(), LoopState::Idle);
}

#[test]
fn continuous_metal_alerts_once_per_window() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 60, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock.clone());

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    // t=0 alert; hold to 1.0 s; reads resume at 1.1 s; 5.0 s is still
    // inside the window; 5.1 s alerts.
    assert_eq!(sink.alert_times(), vec![ms(0), ms(5100)]);
    assert_eq!(stats.alerts, 2);
    assert_eq!(stats.suppressed, 58);
}

#[test]
fn suppressed_ticks_report_remaining_cooldown() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 2, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock);

    block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    // Second read at 1.1 s: 5.0 - 1.1 = 3.9 s left.
    assert!(
        sink.events
            .iter()
            .any(|(_, e)| *e == AppEvent::CooldownActive { remaining: ms(3900) })
    );
}

#[test]
fn notifier_failure_does_not_block_next_alert() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let notifier =
        MockNotifier::with_results([Err(NotifyError::Transport("connection refused".into()))]);
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 60, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        notifier.clone(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock.clone());

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(stats.notify_failures, 1);
    assert_eq!(notifier.sent.borrow().len(), 2, "no retry, but the next alert still fires");
    // The failed alert still owns its window.
    assert_eq!(sink.alert_times(), vec![ms(0), ms(5100)]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::NotificationFailed(NotifyError::Transport(_)))),
        1
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::NotificationSent)), 1);
}

#[test]
fn sensor_read_failure_skips_tick_and_keeps_polling() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let script = [
        Err(HardwareFault::ReadFailed {
            pin: 26,
            detail: "Other".into(),
        }),
        Ok(PinLevel::Low),
    ];
    let sensor = ScriptedSensor::new(script, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock.clone());

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(stats.read_failures, 1);
    assert_eq!(stats.alerts, 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorReadFailed(_))), 1);
    // The failed tick still waited one poll interval.
    assert_eq!(sink.alert_times(), vec![ms(100)]);
}

#[test]
fn clear_reads_never_alert_or_touch_cooldown() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::High, 20, cancel.clone());
    let buzzer = MockBuzzer::new();
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        buzzer.clone(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock);

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(stats.alerts, 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::AreaClear)), 21);
    assert_eq!(coordinator.gate().last_alert_at(), None);
    // Only the teardown write.
    assert_eq!(buzzer.log.borrow().writes, vec![Switch::Off]);
}

#[test]
fn active_high_polarity_is_honoured() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let config = DetectorConfig {
        sensor_polarity: Polarity::ActiveHigh,
        ..DetectorConfig::default()
    };
    let sensor = ScriptedSensor::new([Ok(PinLevel::High), Ok(PinLevel::Low)], cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        config,
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock);

    let stats = block_on(coordinator.run(&cancel, &mut sink)).unwrap();

    assert_eq!(stats.alerts, 1);
    assert_eq!(sink.alert_times(), vec![ms(0)]);
}

#[test]
fn runs_under_local_executor() {
    let cancel = ShutdownToken::new();
    let clock = VirtualClock::new();
    let sensor = ScriptedSensor::repeat(PinLevel::Low, 3, cancel.clone());
    let mut coordinator = DetectionCoordinator::new(
        DetectorConfig::default(),
        sensor,
        MockBuzzer::new(),
        MockNotifier::new(),
        clock.clone(),
    );
    let mut sink = RecordingSink::new(clock);

    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
    let stats = block_on(executor.run(coordinator.run(&cancel, &mut sink))).unwrap();

    assert_eq!(stats.polls, 4);
    assert_eq!(coordinator.state(), LoopState::Stopped);
}
