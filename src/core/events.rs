//! Telemetry event types
//!
//! Defines the wire payload accepted from clients and the canonical
//! structured log record the gateway emits. Client payloads come from an
//! untrusted source, so every field is optional and unknown fields are
//! ignored; the gateway substitutes placeholders instead of rejecting
//! partially valid reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marker appended exactly once to a truncated field
pub const TRUNCATION_MARKER: &str = "...";

/// Replacement message when a report carries no usable message
pub const PLACEHOLDER_SCRIPT_ERROR: &str = "Script error";

/// Replacement message for rejection signals without a message
pub const PLACEHOLDER_REJECTION: &str = "Unhandled promise rejection";

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Error severity, eligible for alert dispatch
    Error,
    /// Warning severity
    Warning,
    /// Informational severity
    Info,
    /// Debug severity
    Debug,
}

impl LogLevel {
    /// Parse a client-supplied level string, defaulting to Error
    pub fn from_client_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "warning" | "warn" => LogLevel::Warning,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }
}

/// Error report as received from (or built by) a client
///
/// Immutable once built; constructed fresh per event and discarded after
/// the transmission attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientErrorPayload {
    /// Severity, always "error" for reports built by the SDK
    #[serde(default = "default_level")]
    pub level: String,
    /// Error message, truncated to the configured maximum
    #[serde(default)]
    pub message: Option<String>,
    /// Page or resource URL the error originated from
    #[serde(default)]
    pub url: Option<String>,
    /// Reporting user agent
    #[serde(rename = "userAgent", default)]
    pub user_agent: Option<String>,
    /// Client-side ISO-8601 timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Stack trace, truncated to the configured maximum
    #[serde(default)]
    pub stack: Option<String>,
    /// Auxiliary scalar context supplied by the client
    #[serde(default)]
    pub extra: Option<HashMap<String, serde_json::Value>>,
}

fn default_level() -> String {
    "error".to_string()
}

/// Canonical structured log record
///
/// Only `ts`, `level`, `logger_name` and `message` are always present;
/// every other field is omitted from the serialized record when absent.
/// Created once per request or accepted client report, immutable after
/// emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Event timestamp, RFC 3339 with millisecond precision
    pub ts: String,
    /// Severity
    pub level: LogLevel,
    /// Originating logger
    pub logger_name: String,
    /// Human-readable message
    pub message: String,
    /// Correlation id shared by all records of one request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// HTTP method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Request path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Response status code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Request duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    /// Originating client address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
    /// Client user agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Matched route pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Time spent in persistence for this request, milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_time_ms: Option<f64>,
    /// Error class or category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stack trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Free-form context, redacted before serialization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_context: Option<serde_json::Value>,
}

impl LogEvent {
    /// Create a new event with the required fields, timestamped now
    pub fn new(level: LogLevel, logger_name: &str, message: impl Into<String>) -> Self {
        Self {
            ts: now_rfc3339_millis(),
            level,
            logger_name: logger_name.to_string(),
            message: message.into(),
            request_id: None,
            method: None,
            path: None,
            status: None,
            duration_ms: None,
            client_ip: None,
            user_agent: None,
            route: None,
            db_time_ms: None,
            error_type: None,
            error: None,
            stack: None,
            extra_context: None,
        }
    }

    /// Set the correlation id
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the originating client address
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }
}

/// Current time as RFC 3339 with millisecond precision
pub fn now_rfc3339_millis() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Truncate `value` to at most `max_len` characters, appending the
/// truncation marker exactly once when anything was cut
///
/// Counts characters rather than bytes so multi-byte input never splits
/// a code point.
pub fn truncate_field(value: &str, max_len: usize) -> String {
    match value.char_indices().nth(max_len) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            out.push_str(&value[..byte_idx]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => value.to_string(),
    }
}
