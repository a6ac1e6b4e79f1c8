//! System configuration parameters
//!
//! All tunable parameters for the detector.  Values come from
//! [`Default`] and can be overridden from the command line; there is no
//! config file.  Out-of-range values are rejected by `validate()`, never
//! silently clamped.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::Polarity;
use crate::error::ConfigError;
use crate::pins;

/// Telegram caps a message body at 4096 characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Default alert text.
pub const DEFAULT_ALERT_MESSAGE: &str = "🚨 Metal detected in the car!";

/// Core detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    // --- Pins ---
    /// BCM number of the metal sensor input
    pub sensor_pin: u8,
    /// BCM number of the buzzer output
    pub buzzer_pin: u8,
    /// Which input level means "metal present"
    pub sensor_polarity: Polarity,

    // --- Timing ---
    /// Delay between sensor polls (milliseconds)
    pub poll_interval_ms: u32,
    /// How long the buzzer sounds per alert (milliseconds)
    pub buzzer_hold_ms: u32,
    /// Minimum time between two alerts (milliseconds)
    pub cooldown_ms: u32,

    // --- Notification ---
    /// Text sent on every alert
    pub alert_message: String,
    /// Upper bound on a single notification attempt (milliseconds)
    pub notify_timeout_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sensor_pin: pins::METAL_SENSOR_GPIO,
            buzzer_pin: pins::BUZZER_GPIO,
            sensor_polarity: pins::SENSOR_POLARITY,

            poll_interval_ms: 100, // 10 Hz
            buzzer_hold_ms: 1000,
            cooldown_ms: 5000,

            alert_message: DEFAULT_ALERT_MESSAGE.to_string(),
            notify_timeout_ms: 10_000,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_pin == self.buzzer_pin {
            return Err(ConfigError::ValidationFailed(
                "sensor_pin and buzzer_pin must differ",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.buzzer_hold_ms == 0 {
            return Err(ConfigError::ValidationFailed("buzzer_hold_ms must be > 0"));
        }
        if self.notify_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("notify_timeout_ms must be > 0"));
        }
        if self.alert_message.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("alert_message must not be empty"));
        }
        if self.alert_message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(ConfigError::ValidationFailed(
                "alert_message exceeds 4096 characters",
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    pub fn buzzer_hold(&self) -> Duration {
        Duration::from_millis(u64::from(self.buzzer_hold_ms))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(u64::from(self.cooldown_ms))
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.notify_timeout_ms))
    }
}

/// Telegram Bot API credentials and endpoint.
///
/// Credentials are passed through untouched; the token is kept out of
/// `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// `Markdown`, `MarkdownV2`, `HTML`, or `None` for plain text.
    pub parse_mode: Option<String>,
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            parse_mode: Some("Markdown".to_string()),
            api_base: "https://api.telegram.org".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("bot_token must not be empty"));
        }
        if self.chat_id.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("chat_id must not be empty"));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigError::ValidationFailed("api_base must be an http(s) URL"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("api_base", &self.api_base)
            .finish()
    }
}
