pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
///
/// Every error leaving the API uses this shape so clients can branch on the
/// machine-readable `error` code and show `message` to humans:
///
/// ```json
/// {
///   "error": "EmailAlreadyTaken",
///   "message": "Email already taken",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse::new("NotFound", "missing")).unwrap();
        assert_eq!(body["error"], "NotFound");
        assert_eq!(body["message"], "missing");
        assert!(body.get("details").is_none());
    }
}
