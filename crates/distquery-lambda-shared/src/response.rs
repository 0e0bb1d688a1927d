//! Response wrapper for successful Lambda responses.

use serde::{Deserialize, Serialize};

/// Wrapper for successful Lambda responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body.
///
/// # Example
///
/// ```
/// use distquery_lambda_shared::LambdaResponse;
/// use distquery_lib::DistanceResult;
///
/// let result = DistanceResult {
///     distance_km: 5.0,
///     duration_minutes: 10.0,
///     distance_text: None,
///     duration_text: None,
/// };
/// let response = LambdaResponse::new(result);
/// assert_eq!(response.content_type, "application/json");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambdaResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> LambdaResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for LambdaResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use distquery_lib::DistanceResult;

    #[test]
    fn test_response_flattens_result() {
        let response = LambdaResponse::new(DistanceResult {
            distance_km: 5.0,
            duration_minutes: 10.0,
            distance_text: Some("5.0 km".to_string()),
            duration_text: None,
        });
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["distanceKm"], 5.0);
        assert_eq!(json["durationMinutes"], 10.0);
        assert_eq!(json["distanceText"], "5.0 km");
        assert!(json.get("durationText").is_none());
        assert_eq!(json["content_type"], "application/json");
    }
}
