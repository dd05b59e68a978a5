//! Structured log emission
//!
//! Internal diagnostics go through `tracing`; the canonical telemetry
//! stream goes through [`LogEmitter`], which serializes one fixed-schema
//! JSON record per line after redacting sensitive fields. Redaction runs
//! on the full payload before serialization, never after.

use crate::config::LogSinkTarget;
use crate::core::events::LogEvent;
use crate::core::redact::{redact_in_place, SensitiveFieldSet};
use crate::utils::error::Result;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for internal diagnostics
///
/// Level comes from `RUST_LOG` when set, falling back to the configured
/// log level.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(diagnostics_filter(default_level))
        .with_target(false)
        .init();
}

fn diagnostics_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

enum Sink {
    Stdout,
    File(Mutex<File>),
}

/// Line-oriented structured log emitter
///
/// Writes one JSON record per line to the configured sink. A failed sink
/// write degrades to stderr and is never raised to the caller.
pub struct LogEmitter {
    sink: Sink,
    sensitive: SensitiveFieldSet,
}

impl LogEmitter {
    /// Create an emitter for the configured sink target
    pub fn new(target: &LogSinkTarget, sensitive: SensitiveFieldSet) -> Result<Self> {
        let sink = match target {
            LogSinkTarget::Stdout => Sink::Stdout,
            LogSinkTarget::File { path } => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Sink::File(Mutex::new(file))
            }
        };
        Ok(Self { sink, sensitive })
    }

    /// Emit one event as a single-line JSON record
    pub fn emit(&self, event: &LogEvent) {
        let mut payload = match serde_json::to_value(event) {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("log event serialization failed: {}", e);
                return;
            }
        };
        redact_in_place(&mut payload, &self.sensitive);

        // Value-to-string cannot fail once the Value exists
        let line = payload.to_string();
        if let Err(e) = self.write_line(&line) {
            eprintln!("log sink write failed: {}; event: {}", e, line);
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match &self.sink {
            Sink::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                writeln!(handle, "{}", line)
            }
            Sink::File(file) => {
                let mut file = file.lock();
                writeln!(file, "{}", line)
            }
        }
    }
}
