//! Telegram Bot API notifier.
//!
//! Sends alerts with `POST {api_base}/bot{token}/sendMessage`.  The HTTP
//! call is blocking (`reqwest::blocking`), so it runs on a dedicated
//! worker thread.  `embassy-sync` channels carry the request over and the
//! result back, which lets the coordinator simply `.await` the outcome
//! without the executor blocking on the network.
//!
//! ```text
//! ┌──────────────────┐  WorkerMsg   ┌──────────────────┐
//! │  Coordinator     │────────────▶│  telegram-tx     │
//! │  (async, await)  │◀────────────│  (blocking HTTP) │
//! └──────────────────┘   Result     └──────────────────┘
//! ```
//!
//! One attempt per alert; a failure is returned to the caller and never
//! retried here.  Requests carry a sequence number so a result that
//! belongs to an abandoned `send_message` future is discarded instead of
//! being handed to the next caller.  The bot token is part of the URL, so transport errors
//! are stripped of their URL before they leave this module.

use core::time::Duration;
use std::sync::Arc;
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::Notifier;
use crate::config::TelegramConfig;
use crate::error::{Error, NotifyError};

/// Longest response excerpt kept in an error description.
const MAX_DESCRIPTION_CHARS: usize = 200;

enum WorkerMsg {
    Send { seq: u32, text: String },
    Stop,
}

type RequestChannel = Channel<CriticalSectionRawMutex, WorkerMsg, 1>;
type ResultChannel = Channel<CriticalSectionRawMutex, (u32, Result<(), NotifyError>), 1>;

// ── Wire types ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Map an HTTP status and body onto the notifier result.
fn interpret_response(status: u16, body: &str) -> Result<(), NotifyError> {
    let success = (200..300).contains(&status);
    match serde_json::from_str::<ApiResponse>(body) {
        Ok(resp) if resp.ok && success => Ok(()),
        Ok(resp) => Err(NotifyError::Api {
            status,
            description: resp
                .description
                .unwrap_or_else(|| "no description".to_string()),
        }),
        Err(_) => Err(NotifyError::Api {
            status,
            description: body.chars().take(MAX_DESCRIPTION_CHARS).collect(),
        }),
    }
}

// ── Worker ────────────────────────────────────────────────────

struct Worker {
    client: reqwest::blocking::Client,
    endpoint: String,
    chat_id: String,
    parse_mode: Option<String>,
}

impl Worker {
    fn deliver(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: self.parse_mode.as_deref(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;
        interpret_response(status, &body)
    }

    fn run(self, requests: &RequestChannel, results: &ResultChannel) {
        loop {
            match futures_lite::future::block_on(requests.receive()) {
                WorkerMsg::Stop => break,
                WorkerMsg::Send { seq, text } => {
                    let result = self.deliver(&text);
                    futures_lite::future::block_on(results.send((seq, result)));
                }
            }
        }
        info!("telegram-tx: stopped");
    }
}

// ── Notifier ──────────────────────────────────────────────────

/// [`Notifier`] backed by the Telegram Bot API.
pub struct TelegramNotifier {
    requests: Arc<RequestChannel>,
    results: Arc<ResultChannel>,
    worker: Option<JoinHandle<()>>,
    seq: u32,
}

impl TelegramNotifier {
    /// Validate credentials and start the delivery worker.
    ///
    /// `timeout` bounds a single delivery attempt end to end.
    pub fn spawn(config: TelegramConfig, timeout: Duration) -> Result<Self, Error> {
        config.validate()?;

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let worker = Worker {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id,
            parse_mode: config.parse_mode,
        };

        let requests: Arc<RequestChannel> = Arc::new(Channel::new());
        let results: Arc<ResultChannel> = Arc::new(Channel::new());
        let (req, res) = (requests.clone(), results.clone());

        info!(
            "Spawning 'telegram-tx' (timeout={}ms)",
            timeout.as_millis()
        );
        let handle = std::thread::Builder::new()
            .name("telegram-tx".into())
            .spawn(move || worker.run(&req, &res))
            .map_err(|_| NotifyError::WorkerUnavailable)?;

        Ok(Self {
            requests,
            results,
            worker: Some(handle),
            seq: 0,
        })
    }
}

impl Notifier for TelegramNotifier {
    async fn send_message(&mut self, text: &str) -> Result<(), NotifyError> {
        if self.worker.as_ref().is_none_or(JoinHandle::is_finished) {
            return Err(NotifyError::WorkerUnavailable);
        }
        self.seq = self.seq.wrapping_add(1);
        let seq = self.seq;
        self.requests
            .send(WorkerMsg::Send {
                seq,
                text: text.to_owned(),
            })
            .await;
        loop {
            let (id, result) = self.results.receive().await;
            if id == seq {
                return result;
            }
            debug!("telegram-tx: discarding result of abandoned request #{}", id);
        }
    }
}

impl Drop for TelegramNotifier {
    fn drop(&mut self) {
        // Unblock a worker that is parked on an unread result.
        while self.results.try_receive().is_ok() {}
        // A full request slot means a send was abandoned mid-flight; the
        // worker would never see Stop, so detach instead of joining.
        if self.requests.try_send(WorkerMsg::Stop).is_ok() {
            if let Some(handle) = self.worker.take() {
                let _ = handle.join();
            }
        }
    }
}
