//! Core rate limiter implementation

use super::types::{RateLimitBucket, RateLimitDecision};
use crate::config::RateLimitConfig;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sliding-window rate limiter keyed by source identifier
///
/// Buckets live in a sharded map, so admission for one key never blocks
/// admission for another while the prune-check-record sequence for a
/// single key runs under that key's shard lock, making per-key decisions
/// linearizable.
pub struct RateLimiter {
    /// Maximum admitted events per key per window
    pub(super) limit: u32,
    /// Window duration
    pub(super) window: Duration,
    /// Buckets by source identifier
    pub(super) buckets: DashMap<String, RateLimitBucket>,
}

impl RateLimiter {
    /// Create a new rate limiter from configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_window(config.limit, Duration::from_secs(config.window_seconds))
    }

    /// Create a rate limiter with an explicit window
    pub fn with_window(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            buckets: DashMap::new(),
        }
    }

    /// Atomically decide admission for one event from `key`
    ///
    /// Timestamps older than the window are discarded first; if capacity
    /// remains the event is recorded and admitted, otherwise it is
    /// rejected without being recorded.
    pub fn admit(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        // Guards against Instant underflow early in process lifetime
        let window_start = now.checked_sub(self.window);

        // Avoid a String allocation when the key already has a bucket
        let mut bucket = match self.buckets.get_mut(key) {
            Some(bucket) => bucket,
            None => self.buckets.entry(key.to_string()).or_default(),
        };

        if let Some(window_start) = window_start {
            bucket.timestamps.retain(|&t| t > window_start);
        }

        let current_count = bucket.timestamps.len() as u32;
        let allowed = current_count < self.limit;
        let remaining = self.limit.saturating_sub(current_count);

        // Time until the oldest admitted event leaves the window
        let reset_after_secs = match bucket.timestamps.first() {
            Some(&oldest) => self
                .window
                .saturating_sub(now.duration_since(oldest))
                .as_secs(),
            None => self.window.as_secs(),
        };

        let retry_after_secs = if allowed {
            bucket.timestamps.push(now);
            None
        } else {
            debug!(
                key,
                current_count,
                limit = self.limit,
                "rate limit exceeded"
            );
            Some(reset_after_secs.max(1))
        };

        RateLimitDecision {
            allowed,
            current_count,
            limit: self.limit,
            remaining: if allowed {
                remaining.saturating_sub(1)
            } else {
                remaining
            },
            retry_after_secs,
        }
    }
}
