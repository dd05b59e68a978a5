//! # errbeacon-rs
//!
//! A small telemetry gateway that ingests unhandled client errors,
//! rate-limits them per source, scrubs sensitive fields and folds every
//! accepted event into a uniform single-line JSON log stream.
//!
//! ## Pipeline
//!
//! ```text
//! error signal -> payload builder -> transport -> POST /client-logs
//!              -> rate limiter -> redactor -> log emitter -> (alert webhook)
//! ```
//!
//! The client half lives in [`sdk`]: a [`sdk::Reporter`] builds a bounded
//! [`core::events::ClientErrorPayload`] from a raw error signal and ships
//! it fire-and-forget. The server half lives in [`server`]: the ingestion
//! endpoint admits or rejects each report per source address, truncates
//! and redacts it, then emits one [`core::events::LogEvent`] to the
//! configured sink. ERROR-level events are additionally forwarded to an
//! optional alert webhook.
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! use errbeacon_rs::config::Config;
//! use errbeacon_rs::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let server = HttpServer::new(&config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod logging;
pub mod sdk;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::events::{ClientErrorPayload, LogEvent, LogLevel};
pub use crate::core::rate_limiter::{RateLimitDecision, RateLimiter};
pub use crate::sdk::Reporter;
pub use crate::utils::error::{GatewayError, Result};
