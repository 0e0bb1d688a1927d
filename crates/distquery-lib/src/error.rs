use std::fmt;

use thiserror::Error;

use crate::request::ValidationError;

/// Convenient result alias for the distance query library.
pub type Result<T> = std::result::Result<T, Error>;

/// Status reported when the upstream element or its status is absent.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more coordinate fields were missing or not finite numbers.
    #[error("originLat, originLng, destLat, and destLng must be valid numbers.")]
    InvalidCoordinates(#[from] ValidationError),

    /// No provider yielded an API key.
    #[error("Missing GOOGLE_MAPS_KEY environment variable.")]
    MissingCredential,

    /// The upstream element was missing or did not report `OK`.
    #[error("Distance Matrix failed: {status}")]
    UpstreamStatus { status: String },

    /// The upstream call itself failed (connect, HTTP status, decode).
    ///
    /// The wrapped error has its URL stripped because the query string
    /// carries the API key.
    #[error("Distance Matrix request failed: {0}")]
    Http(#[source] reqwest::Error),
}

impl Error {
    /// Build an upstream status error, substituting `UNKNOWN` when absent.
    pub fn upstream_status(status: Option<&str>) -> Self {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATUS);
        Error::UpstreamStatus {
            status: status.to_string(),
        }
    }

    /// Classify the error for the hosting platform.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCoordinates(_) => ErrorKind::InvalidArgument,
            Error::MissingCredential => ErrorKind::FailedPrecondition,
            Error::UpstreamStatus { .. } | Error::Http(_) => ErrorKind::Internal,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.without_url())
    }
}

/// Caller-visible error classification.
///
/// Adapters map these onto their transport; the library never picks a
/// status code itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a malformed request.
    InvalidArgument,
    /// The service is misconfigured; only an operator can fix it.
    FailedPrecondition,
    /// The upstream mapping service failed.
    Internal,
}

impl ErrorKind {
    /// Callable-protocol status code, e.g. `INVALID_ARGUMENT`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::FailedPrecondition => "FAILED_PRECONDITION",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Kebab-case name, e.g. `invalid-argument`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid-argument",
            ErrorKind::FailedPrecondition => "failed-precondition",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
