//! Per-source rate limiting
//!
//! Provides sliding window rate limiting keyed by source identifier, with
//! bounded memory under wide-key-range load.

mod limiter;
mod types;
mod utils;

#[cfg(test)]
mod tests;

// Re-export public types
pub use limiter::RateLimiter;
pub use types::RateLimitDecision;
