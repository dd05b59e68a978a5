//! Configuration models

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Ingestion rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Payload bounds and redaction
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Alert webhook
    #[serde(default)]
    pub alerts: AlertConfig,
    /// Structured log sink
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker count (defaults to the number of cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

/// Rate limiting configuration for the ingestion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum accepted events per source per window
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Sliding window size in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_seconds: default_window_seconds(),
        }
    }
}

/// Payload shaping and redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Maximum length (chars) of message and stack fields
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,
    /// Field names whose values must never reach the log stream
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            max_field_len: default_max_field_len(),
            sensitive_fields: default_sensitive_fields(),
        }
    }
}

/// Alert webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Webhook URL; absent disables alert dispatch entirely
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Timeout for the webhook call in seconds
    #[serde(default = "default_alert_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_seconds: default_alert_timeout(),
        }
    }
}

/// Structured log sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Where the JSON event stream goes
    #[serde(default)]
    pub sink: LogSinkTarget,
    /// Level filter for internal diagnostics (tracing)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            sink: LogSinkTarget::default(),
            level: default_log_level(),
        }
    }
}

/// Log sink target
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkTarget {
    /// One JSON record per line on stdout
    #[default]
    Stdout,
    /// Append-only file
    File {
        /// Path to the log file
        path: String,
    },
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_limit() -> u32 {
    10
}

fn default_window_seconds() -> u64 {
    60
}

fn default_max_field_len() -> usize {
    500
}

fn default_sensitive_fields() -> Vec<String> {
    ["password", "token", "email", "phone"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_alert_timeout() -> u64 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}
