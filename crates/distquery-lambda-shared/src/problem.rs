//! RFC 9457 Problem Details for Lambda error responses.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use http::StatusCode;
use serde::{Deserialize, Serialize};

use distquery_lib::{Error as LibError, ErrorKind};

/// Problem type URI for malformed coordinate payloads.
pub const PROBLEM_INVALID_ARGUMENT: &str = "/problems/invalid-argument";

/// Problem type URI for missing service configuration (API key).
pub const PROBLEM_FAILED_PRECONDITION: &str = "/problems/failed-precondition";

/// Problem type URI for upstream and other internal failures.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
///
/// # Example
///
/// ```
/// use distquery_lambda_shared::{ProblemDetails, PROBLEM_INVALID_ARGUMENT};
/// use http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_INVALID_ARGUMENT,
///     "Invalid Argument",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("originLat, originLng, destLat, and destLng must be valid numbers.")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            content_type: "application/problem+json".to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for a malformed request payload.
    pub fn invalid_argument(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_ARGUMENT,
            "Invalid Argument",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 412 when the function is deployed without an API key.
    pub fn failed_precondition(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_FAILED_PRECONDITION,
            "Service Misconfigured",
            StatusCode::PRECONDITION_FAILED,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 500 for upstream or runtime failures.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

/// Convert library errors to ProblemDetails by error kind.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    let detail = error.to_string();
    match error.kind() {
        ErrorKind::InvalidArgument => ProblemDetails::invalid_argument(detail, request_id),
        ErrorKind::FailedPrecondition => ProblemDetails::failed_precondition(detail, request_id),
        ErrorKind::Internal => ProblemDetails::internal_error(detail, request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distquery_lib::ValidationError;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        );
        assert_eq!(problem.type_uri, PROBLEM_INTERNAL_ERROR);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.content_type, "application/problem+json");
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_problem_details_serialization() {
        let problem = ProblemDetails::invalid_argument("Test error", "req-test");
        let json = serde_json::to_string(&problem).unwrap();

        assert!(json.contains("\"type\":\"/problems/invalid-argument\""));
        assert!(json.contains("\"title\":\"Invalid Argument\""));
        assert!(json.contains("\"status\":400"));
        assert!(json.contains("\"detail\":\"Test error\""));
        assert!(json.contains("\"instance\":\"req-test\""));
    }

    #[test]
    fn test_from_lib_error_invalid_argument() {
        let error = LibError::from(ValidationError::new(vec!["originLat"]));
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_INVALID_ARGUMENT);
        assert_eq!(problem.status, 400);
        assert!(problem.detail.unwrap().contains("must be valid numbers"));
    }

    #[test]
    fn test_from_lib_error_missing_credential() {
        let problem = from_lib_error(&LibError::MissingCredential, "req-cfg");

        assert_eq!(problem.type_uri, PROBLEM_FAILED_PRECONDITION);
        assert_eq!(problem.status, 412);
        assert_eq!(problem.instance.as_deref(), Some("req-cfg"));
    }

    #[test]
    fn test_from_lib_error_upstream_status() {
        let error = LibError::upstream_status(Some("ZERO_RESULTS"));
        let problem = from_lib_error(&error, "req-up");

        assert_eq!(problem.type_uri, PROBLEM_INTERNAL_ERROR);
        assert_eq!(problem.status, 500);
        assert!(problem.detail.unwrap().contains("ZERO_RESULTS"));
    }

    #[test]
    fn test_display() {
        let problem = ProblemDetails::internal_error("boom", "req");
        assert_eq!(problem.to_string(), "Internal Error: boom");
    }
}
