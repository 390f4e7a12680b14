//! Response envelope handling.
//!
//! The backend wraps most payloads as `{ "success": bool, "data": ..., "message": ... }`
//! but some endpoints return the bare payload. [`unwrap_envelope`] accepts both.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConsoleError;

/// The wrapper shape used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Strips the envelope when present, otherwise returns the body as-is.
///
/// A body counts as enveloped when it is an object with a boolean `success`
/// field. `success = false` becomes a server error carrying the backend
/// message; a missing `data` yields `null`.
pub fn unwrap_envelope(body: Value) -> Result<Value, ConsoleError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    let Some(Value::Bool(success)) = map.get("success").cloned() else {
        return Ok(Value::Object(map));
    };

    if !success {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Request failed")
            .to_string();
        return Err(ConsoleError::Server {
            status: 200,
            message,
        });
    }

    Ok(map.remove("data").unwrap_or(Value::Null))
}

/// Unwraps and deserializes a response body into `T`.
pub fn decode_payload<T: DeserializeOwned>(body: Value) -> Result<T, ConsoleError> {
    let payload = unwrap_envelope(body)?;
    serde_json::from_value(payload)
        .map_err(|e| ConsoleError::Transport(format!("Unexpected response shape: {}", e)))
}

/// Extracts the `message` (or `error`) field of an error body, if any.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwraps_enveloped_body() {
        let body = json!({"success": true, "data": {"name": "Acme"}});
        assert_eq!(unwrap_envelope(body).unwrap(), json!({"name": "Acme"}));
    }

    #[test]
    fn test_raw_body_passes_through() {
        let body = json!([{"name": "Acme"}]);
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);

        let object = json!({"teacherApp": true});
        assert_eq!(unwrap_envelope(object.clone()).unwrap(), object);
    }

    #[test]
    fn test_non_boolean_success_is_payload() {
        let body = json!({"success": "yes", "data": 1});
        assert_eq!(unwrap_envelope(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_failed_envelope_is_error() {
        let body = json!({"success": false, "message": "Tenant locked"});
        let err = unwrap_envelope(body).unwrap_err();
        assert_eq!(
            err,
            ConsoleError::Server {
                status: 200,
                message: "Tenant locked".into()
            }
        );
    }

    #[test]
    fn test_missing_data_is_null() {
        let body = json!({"success": true, "message": "Deleted"});
        assert_eq!(unwrap_envelope(body).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_payload_shape_error() {
        let body = json!({"success": true, "data": "not a number"});
        let err = decode_payload::<u32>(body).unwrap_err();
        assert!(matches!(err, ConsoleError::Transport(_)));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&json!({"error": "Code already in use"})),
            Some("Code already in use".to_string())
        );
        assert_eq!(error_message(&json!({})), None);
    }
}
