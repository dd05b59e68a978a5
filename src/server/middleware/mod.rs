//! HTTP middleware implementations
//!
//! - Correlation id tracking (`X-Request-ID`)
//! - Structured request/response logging

mod helpers;
mod request_id;
mod request_logging;

pub use helpers::client_ip;
pub use request_id::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER};
pub use request_logging::RequestLoggingMiddleware;
