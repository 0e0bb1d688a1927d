//! Driving distance HTTP microservice.
//!
//! Exposes the distance query over the callable function wire protocol:
//!
//! ```text
//! POST /calculateDistance   {"data": {"originLat": .., "originLng": .., "destLat": .., "destLng": ..}}
//!   200 {"result": {"distanceKm": .., "durationMinutes": .., "distanceText": .., "durationText": ..}}
//!   4xx/5xx {"error": {"status": "INVALID_ARGUMENT", "message": ".."}}
//! ```
//!
//! # Endpoints
//!
//! - `POST /calculateDistance` - Compute driving distance and duration
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (API key resolvable)

#![deny(warnings)]

pub mod callable;
mod health;
pub mod logging;
mod request_id;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use distquery_lib::DistanceMatrixApi;

pub use callable::{calculate_distance, CallableError, CallableRequest, CallableResponse};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use request_id::{extract_or_generate_request_id, RequestId, REQUEST_ID_HEADER};
pub use state::AppState;

/// Build the service router around a query handler.
pub fn router<A>(state: AppState<A>) -> Router
where
    A: DistanceMatrixApi + 'static,
{
    Router::new()
        .route("/calculateDistance", post(calculate_distance::<A>))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
