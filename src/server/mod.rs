//! HTTP server implementation
//!
//! Ingestion endpoint, health check, correlation-id and request-logging
//! middleware, and server wiring.

pub mod builder;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use server::HttpServer;
pub use state::AppState;
