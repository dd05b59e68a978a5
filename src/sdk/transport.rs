//! Fire-and-forget payload transport
//!
//! Delivers serialized reports to the ingestion endpoint on a detached
//! task. All delivery failures are swallowed after an internal debug
//! record: the component never surfaces an error to its caller, never
//! retries, and gives no ordering guarantee between sends.

use crate::core::events::ClientErrorPayload;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single delivery attempt
const SEND_TIMEOUT: Duration = Duration::from_secs(3);

/// Best-effort, at-most-once transport to the ingestion endpoint
#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    endpoint: String,
}

impl Transport {
    /// Create a transport targeting the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Dispatch one payload on a detached task
    ///
    /// The caller's control flow never awaits the outcome; once
    /// dispatched, a send cannot be retracted.
    pub fn send(&self, payload: ClientErrorPayload) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            if let Err(e) = client
                .post(&endpoint)
                .timeout(SEND_TIMEOUT)
                .json(&payload)
                .send()
                .await
            {
                debug!(error = %e, "client report delivery failed");
            }
        });
    }
}
