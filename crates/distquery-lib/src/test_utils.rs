//! Test utilities shared by the library and its adapters.
//!
//! Enable the `test-utils` feature to use these from dependent crates:
//!
//! ```ignore
//! use distquery_lib::test_utils::{element_response, static_resolver, StubMatrix};
//! use distquery_lib::DistanceQueryHandler;
//!
//! let handler = DistanceQueryHandler::new(
//!     StubMatrix::new(element_response("OK", 5000.0, 600.0)),
//!     static_resolver("test-key"),
//! );
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::credential::{Credential, CredentialResolver, CredentialSource};
use crate::error::Result;
use crate::matrix::{DistanceMatrixApi, MatrixResponse};
use crate::request::Coordinate;

/// Arguments of one upstream call, as they would appear in the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub origins: String,
    pub destinations: String,
    pub key: String,
}

/// Upstream stand-in that returns a canned response and records calls.
#[derive(Debug)]
pub struct StubMatrix {
    response: MatrixResponse,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
}

impl StubMatrix {
    pub fn new(response: MatrixResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.recorded
            .lock()
            .expect("stub call log poisoned")
            .last()
            .cloned()
    }
}

impl DistanceMatrixApi for StubMatrix {
    async fn fetch(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        credential: &Credential,
    ) -> Result<MatrixResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded
            .lock()
            .expect("stub call log poisoned")
            .push(RecordedCall {
                origins: origin.to_string(),
                destinations: destination.to_string(),
                key: credential.expose().to_string(),
            });
        Ok(self.response.clone())
    }
}

/// Credential source returning a fixed key.
#[derive(Debug, Clone)]
pub struct StaticCredentialSource(pub String);

impl CredentialSource for StaticCredentialSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn credential(&self) -> Option<Credential> {
        Credential::new(self.0.clone())
    }
}

/// Resolver that always yields `key`.
pub fn static_resolver(key: &str) -> CredentialResolver {
    CredentialResolver::new(vec![Box::new(StaticCredentialSource(key.to_string()))])
}

/// Upstream JSON body with a single element.
pub fn element_body(status: &str, meters: f64, seconds: f64) -> Value {
    json!({
        "destination_addresses": ["San Jose, CA, USA"],
        "origin_addresses": ["San Francisco, CA, USA"],
        "rows": [{
            "elements": [{
                "status": status,
                "distance": {"value": meters, "text": format!("{:.1} km", meters / 1000.0)},
                "duration": {"value": seconds, "text": format!("{} mins", (seconds / 60.0).round())}
            }]
        }],
        "status": "OK"
    })
}

/// Decoded response with a single element.
pub fn element_response(status: &str, meters: f64, seconds: f64) -> MatrixResponse {
    matrix_response(element_body(status, meters, seconds))
}

/// Decode an arbitrary upstream body.
pub fn matrix_response(body: Value) -> MatrixResponse {
    serde_json::from_value(body).expect("fixture body should decode")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_body_texts() {
        let body = element_body("OK", 5000.0, 600.0);
        let element = &body["rows"][0]["elements"][0];
        assert_eq!(element["distance"]["text"], "5.0 km");
        assert_eq!(element["duration"]["text"], "10 mins");
    }

    #[test]
    fn static_resolver_resolves() {
        assert_eq!(static_resolver("k").resolve().unwrap().expose(), "k");
    }
}
