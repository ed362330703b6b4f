//! Field-level validation error payloads.
//!
//! These types define the wire shape of the `data` array carried by a 422
//! response: `{"type": string, "loc": [string|int, ...], "msg": string,
//! "input": any}`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One segment of a field-error location path.
///
/// Serialized untagged so `loc` renders as a mixed array of strings and
/// integers, e.g. `["body", "tags", 2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(u64),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<String> for LocSegment {
    fn from(key: String) -> Self {
        LocSegment::Key(key)
    }
}

impl From<u64> for LocSegment {
    fn from(index: u64) -> Self {
        LocSegment::Index(index)
    }
}

/// A single field-level validation error descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Machine-readable error kind (e.g. `less_than_equal`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Path to the offending field, outermost segment first
    pub loc: Vec<LocSegment>,
    /// Human-readable message
    pub msg: String,
    /// The offending input value
    pub input: JsonValue,
}

impl FieldError {
    pub fn new(
        kind: impl Into<String>,
        loc: Vec<LocSegment>,
        msg: impl Into<String>,
        input: JsonValue,
    ) -> Self {
        Self {
            kind: kind.into(),
            loc,
            msg: msg.into(),
            input,
        }
    }
}
