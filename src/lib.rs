//! telelog - structured event notifications for unreliable endpoints
//!
//! This library delivers log/event notifications from an application to one
//! or more remote messaging endpoints (Telegram to start), tolerating
//! per-endpoint failure without blocking the caller. One `deliver` call fans
//! out to every configured destination concurrently; each destination drives
//! its own bounded retry loop, and no destination's failure affects
//! another's delivery.

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod formatting;
pub mod notification;

// Re-export the crate surface for convenience
pub use crate::config::{Config, ConfigError, DestinationConfig, Environment, TelegramConfig};
pub use crate::core::*;
pub use crate::diagnostics::{Diagnostics, TracingDiagnostics};
pub use crate::notification::dispatcher::EventNotifier;
