//! Callable function wire protocol.
//!
//! Requests carry the payload under `data`; successes are returned under
//! `result`; failures under `error` with a canonical status code. Status
//! codes map onto HTTP as the callable protocol does: `INVALID_ARGUMENT` and
//! `FAILED_PRECONDITION` are 400, `INTERNAL` is 500.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use distquery_lib::{DistanceMatrixApi, DistanceResult, Error as LibError, ErrorKind};

use crate::request_id::{extract_or_generate_request_id, RequestId, REQUEST_ID_HEADER};
use crate::state::AppState;

/// Incoming callable envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableRequest {
    pub data: Value,
}

/// Successful callable envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

/// Error body nested under `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableError {
    /// Canonical status, e.g. `INVALID_ARGUMENT`.
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a CallableError,
}

impl CallableError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status: kind.code().to_string(),
            message: message.into(),
        }
    }

    /// Envelope was not JSON or had no `data` member.
    pub fn bad_request() -> Self {
        Self::new(ErrorKind::InvalidArgument, "Bad Request")
    }

    pub fn from_lib_error(error: &LibError) -> Self {
        Self::new(error.kind(), error.to_string())
    }

    /// HTTP status for this error's canonical code.
    pub fn http_status(&self) -> StatusCode {
        match self.status.as_str() {
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        (self.http_status(), Json(ErrorEnvelope { error: &self })).into_response()
    }
}

/// Handle `POST /calculateDistance`.
pub async fn calculate_distance<A>(
    State(state): State<AppState<A>>,
    headers: HeaderMap,
    body: Result<Json<CallableRequest>, JsonRejection>,
) -> Response
where
    A: DistanceMatrixApi + 'static,
{
    let request_id = extract_or_generate_request_id(&headers);

    let outcome = match body {
        Ok(Json(request)) => query(&state, &request.data, &request_id).await,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "rejected callable envelope");
            Err(CallableError::bad_request())
        }
    };

    let mut response = match outcome {
        Ok(result) => (StatusCode::OK, Json(CallableResponse { result })).into_response(),
        Err(err) => err.into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn query<A: DistanceMatrixApi>(
    state: &AppState<A>,
    data: &Value,
    request_id: &RequestId,
) -> Result<DistanceResult, CallableError> {
    info!(request_id = %request_id, "handling distance request");

    match state.handler().handle(data).await {
        Ok(result) => {
            info!(
                request_id = %request_id,
                distance_km = result.distance_km,
                duration_minutes = result.duration_minutes,
                "distance computed successfully"
            );
            Ok(result)
        }
        Err(e) => {
            match e.kind() {
                ErrorKind::InvalidArgument => {
                    warn!(request_id = %request_id, error = %e, "invalid distance request")
                }
                _ => error!(request_id = %request_id, kind = %e.kind(), error = %e, "distance query failed"),
            }
            Err(CallableError::from_lib_error(&e))
        }
    }
}
