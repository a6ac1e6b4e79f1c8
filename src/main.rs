//! Metal Sentry main entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HalInput/HalOutput   TelegramNotifier   SystemClock           │
//! │  (rppal pins)         (Notifier)         (TimePort + DelayNs)  │
//! │  LogEventSink         ShutdownToken ◀── Ctrl-C / SIGTERM       │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │          DetectionCoordinator (pure logic)             │    │
//! │  │  poll · cooldown gate · buzzer · notify                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use metal_sentry::adapters::log_sink::LogEventSink;
use metal_sentry::adapters::rpi;
use metal_sentry::adapters::telegram::TelegramNotifier;
use metal_sentry::adapters::time::SystemClock;
use metal_sentry::app::ports::Polarity;
use metal_sentry::app::service::DetectionCoordinator;
use metal_sentry::app::shutdown::ShutdownToken;
use metal_sentry::config::{DetectorConfig, TelegramConfig};

// ── Command line ──────────────────────────────────────────────

/// Watch a metal sensor and raise a buzzer + Telegram alert on detection.
#[derive(Parser)]
#[command(name = "metal-sentry", version)]
struct Cli {
    /// BCM pin of the metal sensor output
    #[arg(long, default_value_t = DetectorConfig::default().sensor_pin)]
    sensor_pin: u8,

    /// BCM pin driving the buzzer
    #[arg(long, default_value_t = DetectorConfig::default().buzzer_pin)]
    buzzer_pin: u8,

    /// Sensor reads HIGH (instead of LOW) when metal is present
    #[arg(long)]
    active_high: bool,

    /// Delay between sensor polls, in milliseconds
    #[arg(long, default_value_t = DetectorConfig::default().poll_interval_ms)]
    poll_interval_ms: u32,

    /// How long the buzzer sounds per alert, in milliseconds
    #[arg(long, default_value_t = DetectorConfig::default().buzzer_hold_ms)]
    buzzer_hold_ms: u32,

    /// Minimum time between two alerts, in milliseconds
    #[arg(long, default_value_t = DetectorConfig::default().cooldown_ms)]
    cooldown_ms: u32,

    /// Upper bound on one notification attempt, in milliseconds
    #[arg(long, default_value_t = DetectorConfig::default().notify_timeout_ms)]
    notify_timeout_ms: u32,

    /// Alert message text
    #[arg(long, default_value_t = DetectorConfig::default().alert_message)]
    message: String,

    /// Telegram bot token from @BotFather
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    bot_token: String,

    /// Destination chat id
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    chat_id: String,

    /// Telegram parse mode; "none" sends plain text
    #[arg(long, default_value = "Markdown")]
    parse_mode: String,
}

impl Cli {
    fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            sensor_pin: self.sensor_pin,
            buzzer_pin: self.buzzer_pin,
            sensor_polarity: if self.active_high {
                Polarity::ActiveHigh
            } else {
                Polarity::ActiveLow
            },
            poll_interval_ms: self.poll_interval_ms,
            buzzer_hold_ms: self.buzzer_hold_ms,
            cooldown_ms: self.cooldown_ms,
            alert_message: self.message.clone(),
            notify_timeout_ms: self.notify_timeout_ms,
        }
    }

    fn telegram_config(&self) -> TelegramConfig {
        let mut tg = TelegramConfig::new(self.bot_token.clone(), self.chat_id.clone());
        tg.parse_mode = match self.parse_mode.as_str() {
            "none" | "" => None,
            mode => Some(mode.to_string()),
        };
        tg
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Metal Sentry v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let cli = Cli::parse();
    let config = cli.detector_config();
    config.validate().context("invalid detector configuration")?;

    // ── 3. Notifier ───────────────────────────────────────────
    let notifier = TelegramNotifier::spawn(cli.telegram_config(), config.notify_timeout())
        .context("failed to start Telegram notifier")?;

    // ── 4. Cancellation ───────────────────────────────────────
    let cancel = ShutdownToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("failed to install signal handler")?;
    }

    // ── 5. Hardware ───────────────────────────────────────────
    let (sensor, buzzer) = rpi::open_pins(&config).context("GPIO setup failed")?;

    // ── 6. Coordinator ────────────────────────────────────────
    let mut coordinator =
        DetectionCoordinator::new(config, sensor, buzzer, notifier, SystemClock::new());
    let mut sink = LogEventSink::new();

    info!("System ready. Entering poll loop (Ctrl-C to stop).");

    // ── 7. Poll loop ──────────────────────────────────────────
    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();
    let stats = futures_lite::future::block_on(executor.run(coordinator.run(&cancel, &mut sink)))
        .context("detector stopped on a hardware fault")?;

    info!("Shutdown complete after {} polls, {} alerts", stats.polls, stats.alerts);
    Ok(())
}
