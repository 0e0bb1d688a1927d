//! Test utilities for Lambda handler testing.
//!
//! Re-exports the library's upstream stubs and adds event fixtures:
//!
//! ```ignore
//! use distquery_lambda_shared::test_utils::{mock_request_id, sample_event, StubMatrix};
//!
//! #[test]
//! fn test_handler() {
//!     let payload = sample_event();
//!     let request_id = mock_request_id("test-request-123");
//!     // ... test handler logic
//! }
//! ```

use serde_json::{json, Value};

pub use distquery_lib::test_utils::{
    element_body, element_response, matrix_response, static_resolver, RecordedCall,
    StaticCredentialSource, StubMatrix,
};

/// San Francisco city hall.
pub const ORIGIN: (f64, f64) = (37.7793, -122.4193);

/// San Jose city hall.
pub const DESTINATION: (f64, f64) = (37.3378, -121.8853);

/// A valid coordinate payload for [`ORIGIN`] to [`DESTINATION`].
pub fn sample_event() -> Value {
    json!({
        "originLat": ORIGIN.0,
        "originLng": ORIGIN.1,
        "destLat": DESTINATION.0,
        "destLng": DESTINATION.1
    })
}

/// The same payload wrapped in a callable `{"data": ...}` envelope.
pub fn sample_enveloped_event() -> Value {
    json!({ "data": sample_event() })
}

/// Create a mock request ID for testing.
///
/// Since `lambda_runtime::Context` is non-exhaustive and cannot be directly
/// constructed, tests should use the request ID directly for assertions.
pub fn mock_request_id(suffix: &str) -> String {
    format!("test-request-{}", suffix)
}
