//! Rate limiter types and data structures

use std::time::Instant;

/// Outcome of an admission check
///
/// A rejection is a reported outcome, not an error; the ingestion
/// endpoint turns it into a 429-style response without logging the event.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// Whether the event was admitted
    pub allowed: bool,
    /// Admitted events currently inside the window (before this call)
    pub current_count: u32,
    /// Maximum admitted events per window
    pub limit: u32,
    /// Remaining capacity in the window
    pub remaining: u32,
    /// Seconds until capacity frees up (only set when rejected)
    pub retry_after_secs: Option<u64>,
}

/// Per-key bucket of admitted-event timestamps
///
/// Holds at most `limit` timestamps at any instant: rejected events are
/// never recorded and therefore never consume future window capacity.
#[derive(Debug, Default)]
pub(super) struct RateLimitBucket {
    /// Admission timestamps inside the current window
    pub(super) timestamps: Vec<Instant>,
}
