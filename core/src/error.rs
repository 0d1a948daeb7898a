use serde::Serialize;
use utoipa::ToSchema;

/// Structured error body returned by every WellCheck HTTP endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error code, one of [`codes`]
    pub error: String,
    /// Readable description of what went wrong
    pub message: String,
    /// Request field that caused the error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// The offending value, if it is safe to echo back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<serde_json::Value>,
    /// Request ID for correlating with server logs
    pub request_id: String,
    /// What a correct request looks like
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs_hint: Option<String>,
}

impl ApiError {
    pub fn new(code: &str, message: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            error: code.to_string(),
            message: message.into(),
            field: None,
            received: None,
            request_id: request_id.into(),
            docs_hint: None,
        }
    }
}

/// Error codes used across the API
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const RATE_LIMITED: &str = "rate_limited";
}
