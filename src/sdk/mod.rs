//! Client-side error reporter
//!
//! The capture half of the pipeline: turns a raw error or rejection
//! signal into a bounded [`ClientErrorPayload`](crate::core::events::ClientErrorPayload)
//! and ships it to the ingestion endpoint fire-and-forget. Reporting
//! never fails, never retries and never blocks the caller — telemetry
//! loss under failure is acceptable, amplifying failures is not.
//!
//! ```rust,no_run
//! use errbeacon_rs::sdk::{ErrorSignal, Reporter};
//!
//! # async fn example() {
//! let reporter = Reporter::new("https://gateway.example/client-logs")
//!     .with_page_url("https://app.example/attendance")
//!     .with_user_agent("demo-agent/1.0");
//!
//! reporter.report(&ErrorSignal::exception(
//!     Some("boom".into()),
//!     Some("at main.js:10:3".into()),
//! ));
//! # }
//! ```

pub mod payload;
pub mod transport;

pub use payload::{build_payload, ErrorSignal, SignalKind};
pub use transport::Transport;

use crate::core::events::ClientErrorPayload;

/// Default maximum length for message and stack fields
pub const DEFAULT_MAX_FIELD_LEN: usize = 500;

/// Client error reporter
///
/// Combines the payload builder and the fire-and-forget transport.
pub struct Reporter {
    transport: Transport,
    page_url: Option<String>,
    user_agent: Option<String>,
    max_field_len: usize,
}

impl Reporter {
    /// Create a reporter targeting the given ingestion endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            transport: Transport::new(endpoint),
            page_url: None,
            user_agent: None,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }

    /// Set the page or resource URL attached to every report
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Set the user agent attached to every report
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the maximum message/stack length
    pub fn with_max_field_len(mut self, max_field_len: usize) -> Self {
        self.max_field_len = max_field_len;
        self
    }

    /// Build a payload for `signal` without sending it
    pub fn build(&self, signal: &ErrorSignal) -> ClientErrorPayload {
        build_payload(
            signal,
            self.page_url.as_deref(),
            self.user_agent.as_deref(),
            self.max_field_len,
        )
    }

    /// Report `signal` fire-and-forget
    ///
    /// Returns immediately; the delivery outcome is never observable from
    /// the caller.
    pub fn report(&self, signal: &ErrorSignal) {
        let payload = self.build(signal);
        self.transport.send(payload);
    }
}
