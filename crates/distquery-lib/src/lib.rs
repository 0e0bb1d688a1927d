//! Driving distance query library entry points.
//!
//! This crate validates a coordinate-pair request, resolves the Distance
//! Matrix API key, calls the upstream service once, and normalizes the
//! returned element into a compact [`DistanceResult`]. Hosting adapters (CLI,
//! Lambda, HTTP service) should only depend on the items exported here
//! instead of reimplementing behavior.
//!
//! ```no_run
//! use distquery_lib::{CredentialResolver, DistanceQueryHandler, HttpDistanceMatrix};
//! use serde_json::json;
//!
//! # async fn demo() -> distquery_lib::Result<()> {
//! let handler = DistanceQueryHandler::new(
//!     HttpDistanceMatrix::new()?,
//!     CredentialResolver::from_platform(),
//! );
//! let result = handler
//!     .handle(&json!({
//!         "originLat": 37.7749, "originLng": -122.4194,
//!         "destLat": 37.3382, "destLng": -121.8863
//!     }))
//!     .await?;
//! println!("{} km", result.distance_km);
//! # Ok(())
//! # }
//! ```

#![deny(warnings)]

pub mod credential;
pub mod error;
pub mod handler;
pub mod matrix;
pub mod request;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use credential::{
    Credential, CredentialResolver, CredentialSource, EnvCredentialSource, RuntimeConfigSource,
};
pub use error::{Error, ErrorKind, Result};
pub use handler::{extract_result, DistanceQueryHandler, DistanceResult};
pub use matrix::{DistanceMatrixApi, HttpDistanceMatrix, MatrixElement, MatrixResponse};
pub use request::{parse_coordinate, parse_request, Coordinate, DistanceRequest, ValidationError};
