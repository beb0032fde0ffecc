//! The Telegram destination.
//!
//! Owns endpoint identity, renders the outbound payload through an injected
//! formatter, and delegates the network exchange to the retry/transport
//! layers. All failure detail stays behind the returned boolean.

use crate::config::TelegramConfig;
use crate::core::{Event, Notifier};
use crate::diagnostics::Diagnostics;
use crate::formatting::{MessageFormatter, TelegramTextFormatter};
use crate::notification::retry::{deliver_with_retry, RetryPolicy};
use crate::notification::transport::{TelegramTransport, Transport};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// A destination that posts events to a Telegram chat.
pub struct TelegramNotifier {
    transport: Arc<dyn Transport>,
    formatter: Box<dyn MessageFormatter>,
    retry: RetryPolicy,
    diagnostics: Arc<dyn Diagnostics>,
}

impl TelegramNotifier {
    /// Creates a notifier with explicit collaborators.
    pub fn new(
        transport: Arc<dyn Transport>,
        formatter: Box<dyn MessageFormatter>,
        retry: RetryPolicy,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            transport,
            formatter,
            retry,
            diagnostics,
        }
    }

    /// Creates a notifier from a validated destination config. Timeout and
    /// retry budget are fixed for the notifier's lifetime.
    pub fn from_config(config: &TelegramConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms);
        let transport = match &config.api_url {
            Some(api_url) => {
                TelegramTransport::with_api_url(api_url, &config.bot_token, &config.chat_id, timeout)
            }
            None => TelegramTransport::new(&config.bot_token, &config.chat_id, timeout),
        };

        Self::new(
            Arc::new(transport),
            Box::new(TelegramTextFormatter),
            RetryPolicy::new(config.max_attempts),
            diagnostics,
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    #[instrument(skip(self, event), fields(severity = %event.severity))]
    async fn notify(&self, event: &Event) -> bool {
        let payload = self.formatter.format(event);
        deliver_with_retry(
            self.transport.as_ref(),
            &payload,
            &self.retry,
            self.diagnostics.as_ref(),
        )
        .await
    }
}
