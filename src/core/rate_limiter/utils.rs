//! Utility functions for the rate limiter

use super::limiter::RateLimiter;
use std::sync::Arc;
use std::time::{Duration, Instant};

impl RateLimiter {
    /// Evict buckets whose keys have been idle for longer than the window
    ///
    /// Absence of a bucket is equivalent to zero recent activity, so a
    /// purged key is decided as if it were new on its next admit call.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let Some(window_start) = now.checked_sub(self.window) else {
            return;
        };

        self.buckets.retain(|_, bucket| {
            bucket.timestamps.retain(|&t| t > window_start);
            !bucket.timestamps.is_empty()
        });
    }

    /// Start the background eviction sweep
    ///
    /// Bounds memory under a wide-key-range attack: keys that stop
    /// sending disappear from the table within one sweep interval.
    pub fn start_cleanup_task(self: Arc<Self>) {
        let limiter = self.clone();
        let period = limiter.window.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                limiter.cleanup();
            }
        });
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.buckets.len()
    }

    /// Configured per-window limit
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Configured window duration
    pub fn window(&self) -> Duration {
        self.window
    }
}
