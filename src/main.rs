//! errbeacon gateway binary
//!
//! Ingests client error telemetry and emits a structured JSON log stream.

use errbeacon_rs::server;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Local development convenience, no-op when no .env exists
    dotenvy::dotenv().ok();

    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
