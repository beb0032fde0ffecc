//! The event dispatcher: one logical event in, N concurrent deliveries out.
//!
//! Every `deliver` call fans the event out to all configured destinations at
//! once and waits for each of them to reach a terminal state. Deliveries are
//! isolated: one destination's failure or slowness never affects another's
//! outcome. The caller gets no result back; failures are reported through
//! the diagnostics sink only.

use crate::config::{Config, ConfigError, DestinationConfig};
use crate::core::{Event, Metadata, Notifier, Severity};
use crate::diagnostics::Diagnostics;
use crate::notification::telegram::TelegramNotifier;
use futures::future::join_all;
use std::sync::Arc;
use tracing::instrument;

/// Fans events out to every configured destination.
pub struct EventNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl EventNotifier {
    /// Builds a dispatcher from a configuration.
    ///
    /// Validation happens first, so construction is atomic: on any
    /// `ConfigError` no dispatcher exists. One notifier is constructed per
    /// supported destination entry; entries with an unsupported `kind` are
    /// skipped with a notice.
    pub fn from_config(
        config: &Config,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();
        for destination in &config.destinations {
            match destination {
                DestinationConfig::Telegram(telegram) => {
                    notifiers.push(Arc::new(TelegramNotifier::from_config(
                        telegram,
                        diagnostics.clone(),
                    )));
                }
                DestinationConfig::Unsupported => {
                    diagnostics.notice("skipping destination with unsupported kind");
                }
            }
        }

        Ok(Self {
            notifiers,
            diagnostics,
        })
    }

    /// Builds a dispatcher over an explicit set of notifiers.
    pub fn with_notifiers(
        notifiers: Vec<Arc<dyn Notifier>>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            notifiers,
            diagnostics,
        }
    }

    /// Delivers one event to every destination concurrently and returns once
    /// all of them have reached a terminal state.
    ///
    /// An empty message with no metadata fails the shape check: the call
    /// reports a diagnostic and performs zero deliveries. An empty message
    /// with metadata is a valid payload.
    #[instrument(skip_all, fields(severity = %severity, destinations = self.notifiers.len()))]
    pub async fn deliver(&self, message: &str, severity: Severity, metadata: Metadata) {
        if message.is_empty() && metadata.is_empty() {
            self.diagnostics
                .warn("dropping event: message must be non-empty when no metadata is given");
            return;
        }

        let event = Event::new(message, severity, metadata);
        let deliveries = self.notifiers.iter().map(|notifier| notifier.notify(&event));

        // A plain join, not a short-circuiting combinator: each delivery
        // settles on its own and one failure cannot abort the others.
        let outcomes = join_all(deliveries).await;

        let failed = outcomes.iter().filter(|accepted| !**accepted).count();
        if failed > 0 {
            self.diagnostics.error(&format!(
                "{failed} of {} deliveries failed",
                outcomes.len()
            ));
        }
    }

    pub async fn log(&self, message: &str, metadata: Metadata) {
        self.deliver(message, Severity::Log, metadata).await;
    }

    pub async fn info(&self, message: &str, metadata: Metadata) {
        self.deliver(message, Severity::Info, metadata).await;
    }

    pub async fn warn(&self, message: &str, metadata: Metadata) {
        self.deliver(message, Severity::Warn, metadata).await;
    }

    pub async fn error(&self, message: &str, metadata: Metadata) {
        self.deliver(message, Severity::Error, metadata).await;
    }
}
