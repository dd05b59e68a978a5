//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway
//! configuration. Configuration comes from a YAML file, with environment
//! variables taking precedence for the handful of recognized options.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway }.with_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the current values
    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(host) = env::var("GATEWAY_HOST") {
            self.gateway.server.host = host;
        }
        if let Ok(port) = env::var("GATEWAY_PORT") {
            self.gateway.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(limit) = env::var("CLIENT_LOG_RATE_LIMIT") {
            self.gateway.rate_limit.limit = limit
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid rate limit: {}", e)))?;
        }
        if let Ok(window) = env::var("CLIENT_LOG_WINDOW_SECONDS") {
            self.gateway.rate_limit.window_seconds = window
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid window: {}", e)))?;
        }
        if let Ok(max_len) = env::var("CLIENT_LOG_MAX_FIELD_LEN") {
            self.gateway.telemetry.max_field_len = max_len
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid max field length: {}", e)))?;
        }
        if let Ok(fields) = env::var("SENSITIVE_FIELDS") {
            self.gateway.telemetry.sensitive_fields = fields
                .split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect();
        }
        if let Ok(url) = env::var("LOG_WEBHOOK_URL") {
            if !url.trim().is_empty() {
                self.gateway.alerts.webhook_url = Some(url);
            }
        }
        if let Ok(sink) = env::var("LOG_SINK") {
            self.gateway.log.sink = match sink.as_str() {
                "stdout" => LogSinkTarget::Stdout,
                path => LogSinkTarget::File {
                    path: path.to_string(),
                },
            };
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.gateway.log.level = level;
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.gateway.server.port == 0 {
            return Err(GatewayError::Config("Server port must be non-zero".into()));
        }
        if self.gateway.rate_limit.limit == 0 {
            return Err(GatewayError::Config(
                "Rate limit must allow at least one event per window".into(),
            ));
        }
        if self.gateway.rate_limit.window_seconds == 0 {
            return Err(GatewayError::Config(
                "Rate limit window must be non-zero".into(),
            ));
        }
        if self.gateway.telemetry.max_field_len == 0 {
            return Err(GatewayError::Config(
                "Maximum field length must be non-zero".into(),
            ));
        }
        if let Some(url) = &self.gateway.alerts.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(GatewayError::Config(format!(
                    "Alert webhook URL must be http(s): {}",
                    url
                )));
            }
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }
}
