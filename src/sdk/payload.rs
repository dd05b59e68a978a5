//! Payload builder
//!
//! Pure data shaping: assembles a bounded error report from a raw error
//! or rejection signal. No network or clock side effects beyond the
//! timestamp; construction never fails — anything unusable degrades to a
//! placeholder rather than propagating.

use crate::core::events::{
    now_rfc3339_millis, truncate_field, ClientErrorPayload, PLACEHOLDER_REJECTION,
    PLACEHOLDER_SCRIPT_ERROR,
};
use serde_json::json;
use std::collections::HashMap;

/// What kind of signal produced the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// A raised error event (message/stack/position)
    Exception,
    /// An unhandled rejection carrying an arbitrary reason
    Rejection,
}

/// A raw error or rejection signal as observed at the capture site
#[derive(Debug, Clone)]
pub struct ErrorSignal {
    /// Signal kind
    pub kind: SignalKind,
    /// Error message, if any
    pub message: Option<String>,
    /// Stack trace, if any
    pub stack: Option<String>,
    /// Source file the error originated from
    pub filename: Option<String>,
    /// Line number within the source file
    pub line: Option<u32>,
    /// Column number within the source file
    pub column: Option<u32>,
    /// Rejection reason; may be a string, a structured value or anything
    pub reason: Option<serde_json::Value>,
}

impl ErrorSignal {
    /// An exception signal with a message and stack
    pub fn exception(message: Option<String>, stack: Option<String>) -> Self {
        Self {
            kind: SignalKind::Exception,
            message,
            stack,
            filename: None,
            line: None,
            column: None,
            reason: None,
        }
    }

    /// A rejection signal carrying an arbitrary reason value
    pub fn rejection(reason: Option<serde_json::Value>) -> Self {
        Self {
            kind: SignalKind::Rejection,
            message: None,
            stack: None,
            filename: None,
            line: None,
            column: None,
            reason,
        }
    }

    /// Attach the source position
    pub fn at(mut self, filename: impl Into<String>, line: u32, column: u32) -> Self {
        self.filename = Some(filename.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

/// Build a bounded payload from a raw signal
///
/// Message and stack are independently truncated; a non-string rejection
/// reason contributes its `message` field when present, otherwise a
/// generic placeholder is used.
pub fn build_payload(
    signal: &ErrorSignal,
    page_url: Option<&str>,
    user_agent: Option<&str>,
    max_field_len: usize,
) -> ClientErrorPayload {
    let message = resolve_message(signal);
    let stack = resolve_stack(signal);

    let mut extra: HashMap<String, serde_json::Value> = HashMap::new();
    if let Some(filename) = &signal.filename {
        extra.insert("filename".to_string(), json!(filename));
    }
    if let Some(line) = signal.line {
        extra.insert("line".to_string(), json!(line));
    }
    if let Some(column) = signal.column {
        extra.insert("column".to_string(), json!(column));
    }

    ClientErrorPayload {
        level: "error".to_string(),
        message: Some(truncate_field(&message, max_field_len)),
        url: page_url.map(String::from),
        user_agent: user_agent.map(String::from),
        timestamp: Some(now_rfc3339_millis()),
        stack: stack.map(|s| truncate_field(&s, max_field_len)),
        extra: if extra.is_empty() { None } else { Some(extra) },
    }
}

fn resolve_message(signal: &ErrorSignal) -> String {
    if let Some(message) = signal.message.as_deref().filter(|m| !m.trim().is_empty()) {
        return message.to_string();
    }
    if let Some(reason) = &signal.reason {
        match reason {
            serde_json::Value::String(s) if !s.trim().is_empty() => return s.clone(),
            serde_json::Value::Object(map) => {
                if let Some(serde_json::Value::String(s)) = map.get("message") {
                    if !s.trim().is_empty() {
                        return s.clone();
                    }
                }
            }
            _ => {}
        }
    }
    match signal.kind {
        SignalKind::Rejection => PLACEHOLDER_REJECTION.to_string(),
        SignalKind::Exception => PLACEHOLDER_SCRIPT_ERROR.to_string(),
    }
}

fn resolve_stack(signal: &ErrorSignal) -> Option<String> {
    if signal.stack.is_some() {
        return signal.stack.clone();
    }
    if let Some(serde_json::Value::Object(map)) = &signal.reason {
        if let Some(serde_json::Value::String(stack)) = map.get("stack") {
            return Some(stack.clone());
        }
    }
    None
}
