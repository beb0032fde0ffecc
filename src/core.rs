//! Core domain types and service traits for telelog
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the crate.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a delivered event.
///
/// The enumeration is closed: every variant has a fixed glyph and label, so
/// an unmapped severity is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Plain log output, the lowest severity.
    Log,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// The lowercase name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// The uppercase label rendered into outbound payloads, e.g. `[ERROR]`.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Log => "LOG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// The glyph prefixed to outbound payloads.
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Log => "\u{1F4DD}",
            Severity::Info => "\u{2139}\u{FE0F}",
            Severity::Warn => "\u{26A0}\u{FE0F}",
            Severity::Error => "\u{274C}",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metadata value attached to an event: free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(s) => f.write_str(s),
            MetadataValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        MetadataValue::Number(value as f64)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Number(value.into())
    }
}

/// An ordered key/value mapping attached to an event.
///
/// Insertion order is preserved because it is part of the rendering contract:
/// the metadata block of an outbound payload lists entries in the order the
/// caller supplied them. Inserting an existing key updates the value in place
/// and keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata(Vec<(String, MetadataValue)>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// An immutable event captured at the moment of a `deliver` call.
///
/// One `Event` is constructed per call and shared by reference with every
/// destination; each destination renders its own payload string from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub message: String,
    pub severity: Severity,
    pub metadata: Metadata,
    /// Local wall-clock time at which the event was raised.
    pub occurred_at: DateTime<Local>,
}

impl Event {
    /// Creates an event stamped with the current local time.
    pub fn new(message: impl Into<String>, severity: Severity, metadata: Metadata) -> Self {
        Self {
            message: message.into(),
            severity,
            metadata,
            occurred_at: Local::now(),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// A destination capable of delivering one event to a remote endpoint.
///
/// `true` means the endpoint accepted the payload. Every failure cause
/// (network, timeout, non-2xx response, exhausted retries) collapses to
/// `false`; causes are reported only through the destination's diagnostics
/// sink, never to the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &Event) -> bool;
}
