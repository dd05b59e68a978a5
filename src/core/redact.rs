//! Recursive redaction of sensitive fields
//!
//! Scrubs configured field names from any structured payload before it is
//! logged or forwarded. Keys are matched case-insensitively; matching
//! values are replaced with a fixed marker regardless of type. Sequences
//! are recursed into but never redacted themselves.

use serde_json::Value;
use std::collections::HashSet;

/// Replacement token for any sensitive field's value
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Nesting depth past which values pass through un-recursed
const MAX_DEPTH: usize = 32;

/// Case-insensitive set of field names that must never be logged
///
/// Built once from configuration and static for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct SensitiveFieldSet {
    fields: HashSet<String>,
}

impl SensitiveFieldSet {
    /// Build from configured field names
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|f| f.as_ref().trim().to_lowercase())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Whether `key` names a sensitive field
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains(&key.to_lowercase())
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Redact sensitive values from a structured payload in place
///
/// Every mapping at every depth is scanned; values of matching keys are
/// replaced with [`REDACTION_MARKER`]. Material nested deeper than the
/// depth cap is passed through untouched.
pub fn redact_in_place(value: &mut Value, fields: &SensitiveFieldSet) {
    if fields.is_empty() {
        return;
    }
    redact_at_depth(value, fields, 0);
}

fn redact_at_depth(value: &mut Value, fields: &SensitiveFieldSet, depth: usize) {
    if depth >= MAX_DEPTH {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if fields.contains(key) {
                    *val = Value::String(REDACTION_MARKER.to_string());
                } else {
                    redact_at_depth(val, fields, depth + 1);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                redact_at_depth(item, fields, depth + 1);
            }
        }
        _ => {}
    }
}
