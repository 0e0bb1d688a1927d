//! Application state shared by axum handlers.

use std::sync::Arc;

use distquery_lib::{
    CredentialResolver, DistanceMatrixApi, DistanceQueryHandler, HttpDistanceMatrix,
    Result as LibResult,
};

/// Shared application state.
///
/// Cheaply cloneable (`Arc` internally). Holds the query handler, whose HTTP
/// client is reused across requests; nothing request-specific is stored.
pub struct AppState<A> {
    inner: Arc<DistanceQueryHandler<A>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: DistanceMatrixApi> AppState<A> {
    pub fn new(handler: DistanceQueryHandler<A>) -> Self {
        Self {
            inner: Arc::new(handler),
        }
    }

    pub fn handler(&self) -> &DistanceQueryHandler<A> {
        &self.inner
    }
}

impl AppState<HttpDistanceMatrix> {
    /// State for production: public endpoint, environment then runtime config.
    pub fn from_platform() -> LibResult<Self> {
        let api = HttpDistanceMatrix::new()?;
        Ok(Self::new(DistanceQueryHandler::new(
            api,
            CredentialResolver::from_platform(),
        )))
    }
}
