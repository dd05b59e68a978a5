//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::alerts::AlertDispatcher;
use crate::core::rate_limiter::RateLimiter;
use crate::core::redact::SensitiveFieldSet;
use crate::logging::LogEmitter;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The rate limiter is the only mutable structure in here; everything
/// else is constructed once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Per-source admission control
    pub rate_limiter: Arc<RateLimiter>,
    /// Canonical structured log emitter
    pub emitter: Arc<LogEmitter>,
    /// Best-effort ERROR alert dispatcher
    pub alerts: AlertDispatcher,
}

impl AppState {
    /// Create a new AppState from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let sensitive = SensitiveFieldSet::new(&config.gateway.telemetry.sensitive_fields);
        let emitter = LogEmitter::new(&config.gateway.log.sink, sensitive)?;

        Ok(Self {
            config: Arc::new(config.clone()),
            rate_limiter: Arc::new(RateLimiter::new(&config.gateway.rate_limit)),
            emitter: Arc::new(emitter),
            alerts: AlertDispatcher::new(&config.gateway.alerts),
        })
    }
}
