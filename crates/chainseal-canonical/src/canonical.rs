//! Deterministic JSON serialization.
//!
//! Canonical form follows RFC 8785 ordering: object keys sorted
//! lexicographically at every nesting level, array order preserved, no
//! insignificant whitespace. Values are validated before serialization so a
//! non-finite number is rejected with the JSON path of the offending value
//! instead of silently producing implementation-defined output.

use canonical_json::to_string;
use serde_json::Value;
use std::fmt;

/// Error returned when canonical serialization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalError {
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Provided JSON could not be serialized.
    #[error("canonical serialization failed: {0}")]
    Serialization(String),
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Serializes a JSON value into canonical form.
///
/// # Errors
///
/// Returns [`CanonicalError::NonFiniteNumber`] when the value contains a
/// NaN or Infinity anywhere in its tree.
pub fn to_canonical_json(value: &Value) -> Result<String, CanonicalError> {
    validate(value, Path::root())?;
    to_string(value).map_err(|err| CanonicalError::Serialization(err.to_string()))
}

/// Canonical UTF-8 bytes for a JSON value.
///
/// Equal values always yield equal bytes; this is the only form digests are
/// computed over.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, CanonicalError> {
    Ok(to_canonical_json(value)?.into_bytes())
}

/// Recursively converts all JSON numbers into strings.
///
/// Hash inputs run through this fold before canonicalization so a digest
/// never depends on how a producer formats numeric values.
pub fn stringify_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v);
            }
        }
        _ => {}
    }
}

/// Validates the JSON value tree before serialization.
fn validate(value: &Value, path: Path) -> Result<(), CanonicalError> {
    match value {
        Value::Object(map) => {
            // serde_json maps cannot carry duplicate keys; duplicate
            // detection belongs to the parsing layer.
            for (key, child) in map {
                validate(child, path.push_field(key))?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                validate(item, path.push_index(idx))?;
            }
            Ok(())
        }
        Value::Number(num) => {
            if num.is_f64() {
                let finite = num.as_f64().map(f64::is_finite).unwrap_or(false);
                if !finite {
                    return Err(CanonicalError::NonFiniteNumber(format!("{}", path)));
                }
            }
            Ok(())
        }
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}
