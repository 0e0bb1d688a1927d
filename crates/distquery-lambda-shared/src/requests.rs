//! Event payloads and validation for Lambda endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use distquery_lib::{parse_request, DistanceRequest, Error as LibError};

use crate::{from_lib_error, ProblemDetails};

/// Validation trait for Lambda request types.
///
/// Implementations validate all fields and produce the typed request, or a
/// `ProblemDetails` error for invalid input.
pub trait Validate {
    type Output;

    /// Validate the request.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`. Returns a boxed `ProblemDetails` to avoid
    /// large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<Self::Output, Box<ProblemDetails>>;
}

/// Raw distance query event.
///
/// Accepts the coordinate object directly or wrapped in a callable-style
/// `{"data": {...}}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistancePayload(pub Value);

impl DistancePayload {
    /// The coordinate object, with any `data` envelope removed.
    pub fn body(&self) -> &Value {
        match self.0.as_object() {
            Some(map) if map.len() == 1 && map.contains_key("data") => &map["data"],
            _ => &self.0,
        }
    }
}

impl From<Value> for DistancePayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Validate for DistancePayload {
    type Output = DistanceRequest;

    fn validate(&self, request_id: &str) -> Result<DistanceRequest, Box<ProblemDetails>> {
        parse_request(self.body()).map_err(|err| {
            warn!(
                request_id = %request_id,
                invalid_fields = ?err.invalid_fields,
                "rejected distance request"
            );
            Box::new(from_lib_error(&LibError::from(err), request_id))
        })
    }
}
