use chrono::DateTime;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// Compiled dot-separated accessor over opaque JSON records.
///
/// The path is split into segments once at construction; per-record
/// resolution is a plain key walk with no string processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePath {
    raw: String,
    segments: Vec<String>,
}

impl ValuePath {
    pub fn parse(path: &str) -> ChartResult<Self> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(ChartError::InvalidConfig(format!(
                "value path `{path}` must be non-empty dot-separated keys"
            )));
        }

        Ok(Self {
            raw: path.to_owned(),
            segments: path.split('.').map(str::to_owned).collect(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolves the path against one record.
    ///
    /// Returns `None` whenever any intermediate key is missing or the leaf
    /// cannot be converted; the caller drops that point rather than
    /// substituting a default.
    #[must_use]
    pub fn resolve(&self, record: &Value) -> Option<f64> {
        let mut current = record;
        for segment in &self.segments {
            current = current.get(segment)?;
        }
        leaf_to_scalar(current)
    }
}

/// Converts a resolved leaf into an axis scalar.
///
/// Date-time strings become Unix seconds; a timestamp equal to the epoch
/// zero is the "unset" sentinel and resolves to `None` instead of a spurious
/// zero. Everything else must coerce to a finite float.
fn leaf_to_scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                let seconds = parsed.timestamp();
                if seconds == 0 {
                    return None;
                }
                return Some(seconds as f64);
            }
            text.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}
