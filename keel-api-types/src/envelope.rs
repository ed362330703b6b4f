//! The standard `{code, message, data}` response envelope.

use serde::{Deserialize, Serialize};

/// Standard API response envelope.
///
/// Every handler outcome is serialized as exactly one envelope. `code == 0`
/// signals success; any nonzero value is a business or HTTP status code. An
/// absent payload serializes as `"data": null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Business status code (0 on success)
    pub code: i32,
    /// Human-readable message
    pub message: String,
    /// Response payload, `null` when absent
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Create an envelope with an explicit code and message.
    pub fn of(code: i32, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Create a success envelope (`code: 0, message: "Success"`).
    pub fn ok(data: T) -> Self {
        Self::of(0, "Success", Some(data))
    }

    /// Create a success envelope without a payload.
    pub fn empty() -> Self {
        Self::of(0, "Success", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serializes_expected_shape() {
        let envelope = Envelope::ok(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"code": 0, "message": "Success", "data": [1, 2, 3]})
        );
    }

    #[test]
    fn missing_payload_serializes_as_null() {
        let envelope = Envelope::<()>::of(404, "Not Found", None);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["code"], 404);
    }

    #[test]
    fn envelope_round_trips_typed_payload() {
        let envelope = Envelope::ok("hello".to_string());
        let text = serde_json::to_string(&envelope).unwrap();
        let back: Envelope<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, envelope);
    }
}
