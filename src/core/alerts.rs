//! Alert dispatch for error-severity events
//!
//! Forwards a summarized notification to a configured webhook for every
//! ERROR-level log event. Delivery is best-effort and fully decoupled
//! from the request path: the call runs on a detached task with a short
//! timeout, and any failure is swallowed after an internal debug record.

use crate::config::AlertConfig;
use crate::core::events::{LogEvent, LogLevel};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Best-effort webhook dispatcher for ERROR events
///
/// Construct once at startup; an unconfigured webhook URL makes every
/// dispatch a no-op.
#[derive(Clone)]
pub struct AlertDispatcher {
    client: reqwest::Client,
    webhook_url: Option<String>,
    timeout: Duration,
}

impl AlertDispatcher {
    /// Create a dispatcher from configuration
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Whether a webhook is configured
    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Forward `event` to the webhook if it is ERROR-level
    ///
    /// Returns immediately; the outcome already returned to the original
    /// caller is never affected by delivery failure or timeout.
    pub fn dispatch(&self, event: &LogEvent) {
        if event.level != LogLevel::Error {
            return;
        }
        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let body = json!({
            "text": format!(
                "[ERROR] {} (request_id={})",
                event.message,
                event.request_id.as_deref().unwrap_or("-"),
            ),
            "message": event.message,
            "error_type": event.error_type,
            "request_id": event.request_id,
            "ts": event.ts,
        });

        let client = self.client.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            match client.post(&url).timeout(timeout).json(&body).send().await {
                Ok(response) if !response.status().is_success() => {
                    debug!(status = %response.status(), "alert webhook returned non-success");
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "alert webhook delivery failed");
                }
            }
        });
    }
}
