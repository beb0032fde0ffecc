//! Operator-facing diagnostics.
//!
//! Delivery failures are never surfaced to the calling code; they are
//! reported through a [`Diagnostics`] sink injected at construction time.
//! The default sink forwards to the `tracing` subscriber installed by the
//! host application.

use tracing::{error, info, warn};

/// Side channel for operator-facing delivery diagnostics.
pub trait Diagnostics: Send + Sync {
    fn notice(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn notice(&self, message: &str) {
        info!(target: "telelog", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "telelog", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "telelog", "{message}");
    }
}
