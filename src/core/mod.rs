//! Core telemetry pipeline components

pub mod alerts;
pub mod events;
pub mod rate_limiter;
pub mod redact;
