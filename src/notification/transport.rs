//! HTTP transport for the Telegram Bot API.
//!
//! One [`Transport::attempt`] call is a single network round-trip, bounded
//! by the configured timeout. The transport never panics and never lets an
//! error escape its `Result`; the retry layer decides what to do with a
//! failure.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Base URL of the public Telegram Bot API.
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// A failed transport attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status. `detail` carries the
    /// best-effort decoded response body for diagnostics.
    #[error("endpoint returned status {status}: {detail}")]
    Status { status: StatusCode, detail: String },
    /// The request never completed: a network-layer failure, or the
    /// per-attempt timeout elapsed and the in-flight request was aborted.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Issues one bounded-timeout request carrying a destination payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn attempt(&self, payload: &str) -> Result<(), TransportError>;
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
pub struct TelegramTransport {
    client: reqwest::Client,
    url: String,
    chat_id: String,
    timeout: Duration,
}

impl TelegramTransport {
    /// Creates a transport against the public Bot API.
    pub fn new(bot_token: &str, chat_id: &str, timeout: Duration) -> Self {
        Self::with_api_url(TELEGRAM_API_URL, bot_token, chat_id, timeout)
    }

    /// Creates a transport against a specific Bot API server, e.g. a
    /// self-hosted instance.
    pub fn with_api_url(api_url: &str, bot_token: &str, chat_id: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), bot_token),
            chat_id: chat_id.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn attempt(&self, payload: &str) -> Result<(), TransportError> {
        let body = json!({
            "chat_id": self.chat_id,
            "text": payload,
            "parse_mode": "HTML",
        });

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "endpoint accepted payload");
            return Ok(());
        }

        // Best effort: the Bot API explains rejections in a JSON body.
        let detail = match response.json::<Value>().await {
            Ok(value) => value.to_string(),
            Err(_) => String::new(),
        };
        Err(TransportError::Status { status, detail })
    }
}
