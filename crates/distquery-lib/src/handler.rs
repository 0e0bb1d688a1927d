//! The distance query operation.
//!
//! [`DistanceQueryHandler::handle`] runs the whole flow for one invocation:
//!
//! 1. validate the payload (no network access on failure),
//! 2. resolve the API key (no network access on failure),
//! 3. fetch the matrix for exactly one origin and one destination,
//! 4. extract `rows[0].elements[0]` and require status `OK`,
//! 5. normalize meters to kilometers and seconds to minutes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::credential::CredentialResolver;
use crate::error::{Error, Result, UNKNOWN_STATUS};
use crate::matrix::{DistanceMatrixApi, MatrixResponse};
use crate::request::{parse_request, DistanceRequest};

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Normalized distance and duration for one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    pub distance_km: f64,
    pub duration_minutes: f64,
    /// Upstream rendering of the distance, e.g. `"5.0 km"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_text: Option<String>,
    /// Upstream rendering of the duration, e.g. `"10 mins"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,
}

/// Validates, resolves the key, calls the upstream, and reshapes the answer.
///
/// Holds no per-request state; one instance can serve any number of
/// invocations.
#[derive(Debug)]
pub struct DistanceQueryHandler<A> {
    api: A,
    credentials: CredentialResolver,
}

impl<A: DistanceMatrixApi> DistanceQueryHandler<A> {
    pub fn new(api: A, credentials: CredentialResolver) -> Self {
        Self { api, credentials }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    /// Run a query from an untyped payload.
    pub async fn handle(&self, payload: &Value) -> Result<DistanceResult> {
        let request = parse_request(payload)?;
        self.handle_request(&request).await
    }

    /// Run a query from an already-validated request.
    pub async fn handle_request(&self, request: &DistanceRequest) -> Result<DistanceResult> {
        let credential = self.credentials.resolve()?;

        let response = self
            .api
            .fetch(request.origin(), request.destination(), &credential)
            .await?;

        let result = extract_result(&response)?;

        info!(
            distance_km = result.distance_km,
            duration_minutes = result.duration_minutes,
            "distance computed"
        );

        Ok(result)
    }
}

/// Extract and normalize the first element of a matrix response.
pub fn extract_result(response: &MatrixResponse) -> Result<DistanceResult> {
    let Some(element) = response.first_element() else {
        warn!(
            status = response.status.as_deref().unwrap_or(UNKNOWN_STATUS),
            error_message = response.error_message.as_deref().unwrap_or(""),
            "distance matrix response has no element"
        );
        return Err(Error::upstream_status(None));
    };

    if !element.is_ok() {
        return Err(Error::upstream_status(element.status.as_deref()));
    }

    let distance = element.distance.as_ref();
    let duration = element.duration.as_ref();
    let (Some(meters), Some(seconds)) = (
        distance.and_then(|d| d.value),
        duration.and_then(|d| d.value),
    ) else {
        warn!("distance matrix element is OK but lacks distance or duration values");
        return Err(Error::upstream_status(None));
    };

    Ok(DistanceResult {
        distance_km: meters / METERS_PER_KM,
        duration_minutes: seconds / SECONDS_PER_MINUTE,
        distance_text: distance.and_then(|d| d.text.clone()),
        duration_text: duration.and_then(|d| d.text.clone()),
    })
}
