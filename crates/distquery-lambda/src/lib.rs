//! AWS Lambda function for driving distance queries.
//!
//! Accepts `{originLat, originLng, destLat, destLng}` (optionally wrapped in
//! `{"data": ...}`) and returns `{distanceKm, durationMinutes, distanceText,
//! durationText}` or an RFC 9457 problem.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use distquery_lambda_shared::{
    from_lib_error, get_runtime, init_error_to_problem, init_tracing, DistancePayload,
    LambdaResponse, ProblemDetails, Validate,
};
use distquery_lib::{DistanceMatrixApi, DistanceQueryHandler, DistanceResult};

/// Lambda response - either success or RFC 9457 error.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(LambdaResponse<DistanceResult>),
    Error(ProblemDetails),
}

/// Entry point used by the Lambda runtime.
pub async fn run() -> Result<(), Error> {
    init_tracing();

    // Build the shared HTTP client up front so the first invocation does not pay for it.
    if let Err(e) = get_runtime() {
        error!(error = %e, "continuing without runtime; invocations will report the failure");
    }

    lambda_runtime::run(service_fn(handler)).await
}

/// Lambda handler invoked per request.
pub async fn handler(event: LambdaEvent<Value>) -> Result<Response, Error> {
    let request_id = event.context.request_id.clone();

    let runtime = match get_runtime() {
        Ok(runtime) => runtime,
        Err(e) => return Ok(Response::Error(init_error_to_problem(&e, &request_id))),
    };

    Ok(handle_distance_event(runtime.handler(), event.payload, &request_id).await)
}

/// Core handler logic, generic over the upstream so tests can substitute it.
pub async fn handle_distance_event<A: DistanceMatrixApi>(
    handler: &DistanceQueryHandler<A>,
    payload: Value,
    request_id: &str,
) -> Response {
    let payload = DistancePayload::from(payload);
    let request = match payload.validate(request_id) {
        Ok(request) => request,
        Err(problem) => return Response::Error(*problem),
    };

    info!(
        request_id = %request_id,
        origin = %request.origin(),
        destination = %request.destination(),
        "handling distance request"
    );

    match handler.handle_request(&request).await {
        Ok(result) => {
            info!(
                request_id = %request_id,
                distance_km = result.distance_km,
                duration_minutes = result.duration_minutes,
                "distance computed successfully"
            );
            Response::Success(LambdaResponse::new(result))
        }
        Err(e) => {
            error!(
                request_id = %request_id,
                kind = %e.kind(),
                error = %e,
                "distance query failed"
            );
            Response::Error(from_lib_error(&e, request_id))
        }
    }
}
