//! Response Envelope
//!
//! Every endpoint returns the same JSON body shape, success or failure:
//!
//! ```json
//! {
//!   "success": true,
//!   "code": 200,
//!   "message": "OK",
//!   "data": { },
//!   "error": null,
//!   "request_id": "..."
//! }
//! ```

use serde::Serialize;

use crate::error::kind::ErrorKind;

/// Machine-readable error information inside a failure envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Stable snake_case identifier (e.g. `rate_limited`)
    #[serde(rename = "type")]
    pub error_type: String,
    /// Optional extra context; omitted unless present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Uniform response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub error: Option<ErrorInfo>,
    pub request_id: String,
}

impl Envelope {
    /// Success envelope with `200 OK` defaults
    pub fn ok(request_id: impl Into<String>, data: serde_json::Value) -> Self {
        Self::ok_with(request_id, data, "OK", 200)
    }

    /// Success envelope with a custom message and code (e.g. `201 Created`)
    pub fn ok_with(
        request_id: impl Into<String>,
        data: serde_json::Value,
        message: impl Into<String>,
        code: u16,
    ) -> Self {
        Self {
            success: true,
            code,
            message: message.into(),
            data: Some(data),
            error: None,
            request_id: request_id.into(),
        }
    }

    /// Failure envelope for the given error kind
    pub fn fail(
        request_id: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            code: kind.status_code(),
            message: message.into(),
            data: None,
            error: Some(ErrorInfo {
                error_type: kind.error_type().to_string(),
                details,
            }),
            request_id: request_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let env = Envelope::ok("rid-1", serde_json::json!({"status": "ok"}));
        assert!(env.success);
        assert_eq!(env.code, 200);
        assert_eq!(env.message, "OK");
        assert!(env.error.is_none());
        assert_eq!(env.request_id, "rid-1");
    }

    #[test]
    fn test_fail_envelope() {
        let env = Envelope::fail(
            "rid-2",
            ErrorKind::TooManyRequests,
            "Rate limit exceeded",
            None,
        );
        assert!(!env.success);
        assert_eq!(env.code, 429);
        assert!(env.data.is_none());
        let error = env.error.expect("failure envelope carries error info");
        assert_eq!(error.error_type, "rate_limited");
        assert!(error.details.is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let env = Envelope::fail(
            "rid-3",
            ErrorKind::UnprocessableEntity,
            "Validation error",
            Some(serde_json::json!(["page must be >= 1"])),
        );
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["success"], serde_json::json!(false));
        assert_eq!(value["code"], serde_json::json!(422));
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["error"]["type"], serde_json::json!("validation_error"));
        assert_eq!(value["request_id"], serde_json::json!("rid-3"));
    }

    #[test]
    fn test_created_envelope() {
        let env = Envelope::ok_with("rid-4", serde_json::json!({}), "Key created", 201);
        assert!(env.success);
        assert_eq!(env.code, 201);
        assert_eq!(env.message, "Key created");
    }
}
