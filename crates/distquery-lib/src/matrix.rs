//! Distance Matrix API wire types and HTTP client.

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::credential::Credential;
use crate::error::Result;
use crate::request::Coordinate;

/// Fixed Distance Matrix endpoint.
pub const DISTANCE_MATRIX_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Status literal the upstream uses for success.
pub const STATUS_OK: &str = "OK";

/// Top-level Distance Matrix response.
///
/// Every field is defaulted when absent, `null`, or of the wrong type, so a
/// body of unexpected shape still decodes and is rejected during extraction
/// instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatrixResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rows: Vec<MatrixRow>,
}

impl MatrixResponse {
    /// Decode an upstream JSON document, falling back to an empty response
    /// when the top level is not an object.
    pub fn from_json(body: Value) -> Self {
        if !body.is_object() {
            warn!("distance matrix body is not a JSON object");
            return Self::default();
        }
        Self::deserialize(body).unwrap_or_default()
    }

    /// The element for the first origin/destination pair, if any.
    pub fn first_element(&self) -> Option<&MatrixElement> {
        self.rows.first().and_then(|row| row.elements.first())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatrixRow {
    #[serde(default, deserialize_with = "lenient")]
    pub elements: Vec<MatrixElement>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MatrixElement {
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub distance: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<TextValue>,
}

impl MatrixElement {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }
}

/// A numeric value with its human-readable rendering, e.g. `5000` / `"5.0 km"`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextValue {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

/// Decode a field, substituting its default for `null` or a mistyped value.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Upstream distance-matrix capability.
///
/// Implementations issue exactly one request per call and do not retry.
pub trait DistanceMatrixApi: Send + Sync {
    fn fetch(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        credential: &Credential,
    ) -> impl Future<Output = Result<MatrixResponse>> + Send;
}

/// `reqwest`-backed Distance Matrix client.
///
/// The inner client pools connections and is cheap to clone; build it once
/// per process.
#[derive(Debug, Clone)]
pub struct HttpDistanceMatrix {
    client: Client,
    endpoint: String,
}

impl HttpDistanceMatrix {
    /// Client pointed at the public Distance Matrix endpoint.
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DISTANCE_MATRIX_ENDPOINT)
    }

    /// Client pointed at an alternate endpoint (for example a local mock server).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DistanceMatrixApi for HttpDistanceMatrix {
    async fn fetch(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        credential: &Credential,
    ) -> Result<MatrixResponse> {
        let origins = origin.to_string();
        let destinations = destination.to_string();

        debug!(
            origins = %origins,
            destinations = %destinations,
            "requesting distance matrix"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("origins", origins.as_str()),
                ("destinations", destinations.as_str()),
                ("key", credential.expose()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<Value>().await?;
        Ok(MatrixResponse::from_json(body))
    }
}

fn user_agent() -> String {
    format!(
        "distquery-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/distquery-rs"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_response() {
        let body = r#"{
            "destination_addresses": ["San Jose, CA, USA"],
            "origin_addresses": ["San Francisco, CA, USA"],
            "rows": [{
                "elements": [{
                    "distance": {"text": "77.9 km", "value": 77906},
                    "duration": {"text": "54 mins", "value": 3254},
                    "status": "OK"
                }]
            }],
            "status": "OK"
        }"#;
        let response: MatrixResponse = serde_json::from_str(body).unwrap();
        let element = response.first_element().expect("element present");

        assert!(element.is_ok());
        assert_eq!(element.distance.as_ref().unwrap().value, Some(77906.0));
        assert_eq!(
            element.duration.as_ref().unwrap().text.as_deref(),
            Some("54 mins")
        );
    }

    #[test]
    fn decodes_error_response_without_rows() {
        let body = r#"{"error_message":"The provided API key is invalid.","rows":[],"status":"REQUEST_DENIED"}"#;
        let response: MatrixResponse = serde_json::from_str(body).unwrap();

        assert!(response.first_element().is_none());
        assert_eq!(response.status.as_deref(), Some("REQUEST_DENIED"));
    }

    #[test]
    fn decodes_empty_object() {
        let response: MatrixResponse = serde_json::from_str("{}").unwrap();
        assert!(response.first_element().is_none());
    }

    #[test]
    fn null_and_mistyped_fields_fall_back_to_defaults() {
        let response: MatrixResponse =
            serde_json::from_str(r#"{"rows": null, "status": "INVALID_REQUEST"}"#).unwrap();
        assert!(response.rows.is_empty());
        assert_eq!(response.status.as_deref(), Some("INVALID_REQUEST"));

        let response: MatrixResponse = serde_json::from_str(
            r#"{"status": 7, "rows": [{"elements": {"status": "OK"}}]}"#,
        )
        .unwrap();
        assert!(response.status.is_none());
        assert!(response.first_element().is_none());

        let element: MatrixElement = serde_json::from_str(
            r#"{"status": "OK", "distance": {"value": "far", "text": 3}, "duration": null}"#,
        )
        .unwrap();
        assert!(element.is_ok());
        assert_eq!(element.distance, Some(TextValue::default()));
        assert!(element.duration.is_none());
    }

    #[test]
    fn non_object_body_decodes_empty() {
        assert_eq!(
            MatrixResponse::from_json(serde_json::json!([1, 2])),
            MatrixResponse::default()
        );
        assert_eq!(
            MatrixResponse::from_json(serde_json::json!(null)),
            MatrixResponse::default()
        );
    }

    #[test]
    fn element_without_status_is_not_ok() {
        let element: MatrixElement = serde_json::from_str(r#"{"status":"NOT_FOUND"}"#).unwrap();
        assert!(!element.is_ok());
        assert!(!MatrixElement::default().is_ok());
    }

    #[test]
    fn default_endpoint() {
        let client = HttpDistanceMatrix::new().unwrap();
        assert_eq!(client.endpoint(), DISTANCE_MATRIX_ENDPOINT);
    }
}
