//! Process-wide Lambda runtime state.
//!
//! The runtime owns a single [`DistanceQueryHandler`] whose HTTP client keeps
//! its connection pool warm across invocations. It holds no per-request
//! state: the API key is still resolved on every invocation, so rotating
//! `GOOGLE_MAPS_KEY` or the runtime config takes effect without a cold start.

use std::sync::OnceLock;
use std::time::Instant;

use tracing::{error, info};

use distquery_lib::{CredentialResolver, DistanceQueryHandler, Error as LibError, HttpDistanceMatrix};

use crate::problem::ProblemDetails;

/// Lazily-initialized Lambda runtime state.
static RUNTIME: OnceLock<Result<LambdaRuntime, InitError>> = OnceLock::new();

/// Error during runtime initialization.
#[derive(Debug, Clone)]
pub struct InitError {
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lambda initialization failed: {}", self.message)
    }
}

impl std::error::Error for InitError {}

impl From<LibError> for InitError {
    fn from(err: LibError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Initialized Lambda runtime containing the distance query handler.
pub struct LambdaRuntime {
    handler: DistanceQueryHandler<HttpDistanceMatrix>,
}

impl LambdaRuntime {
    /// Build a runtime against the public Distance Matrix endpoint with the
    /// platform credential order (environment, then runtime config).
    pub fn from_platform() -> Result<Self, InitError> {
        let api = HttpDistanceMatrix::new()?;
        Ok(Self {
            handler: DistanceQueryHandler::new(api, CredentialResolver::from_platform()),
        })
    }

    /// Access the query handler.
    pub fn handler(&self) -> &DistanceQueryHandler<HttpDistanceMatrix> {
        &self.handler
    }
}

/// Get the runtime, initializing it on first use.
///
/// A failed initialization is cached and returned on every later call.
pub fn get_runtime() -> Result<&'static LambdaRuntime, InitError> {
    let result = RUNTIME.get_or_init(|| {
        let start = Instant::now();
        let runtime = LambdaRuntime::from_platform();
        let init_ms = start.elapsed().as_millis();

        match &runtime {
            Ok(rt) => info!(
                init_ms = init_ms,
                endpoint = rt.handler.api().endpoint(),
                credential_sources = ?rt.handler.credentials(),
                "Lambda runtime initialization complete"
            ),
            Err(e) => error!(error = %e, "Lambda runtime initialization failed"),
        }

        runtime
    });

    result.as_ref().map_err(Clone::clone)
}

/// Create a `ProblemDetails` for initialization errors.
///
/// Use this when the handler fails during cold start to return a proper
/// RFC 9457 error response.
pub fn init_error_to_problem(error: &InitError, request_id: &str) -> ProblemDetails {
    ProblemDetails::internal_error(error.message.clone(), request_id)
}
