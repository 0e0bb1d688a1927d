//! Shared infrastructure for distance query AWS Lambda functions.
//!
//! This crate provides common functionality used across Lambda handlers:
//!
//! - [`LambdaRuntime`]: Process-wide query handler with a pooled HTTP client
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`LambdaResponse`]: Wrapper for successful responses with content type
//! - [`DistancePayload`]: Event payload with validation into a typed request
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides payload fixtures and mock request IDs for
//! Lambda handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod problem;
mod requests;
mod response;
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_FAILED_PRECONDITION, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_ARGUMENT,
};
pub use requests::{DistancePayload, Validate};
pub use response::LambdaResponse;
pub use runtime::{get_runtime, init_error_to_problem, InitError, LambdaRuntime};
pub use tracing_init::init_tracing;
