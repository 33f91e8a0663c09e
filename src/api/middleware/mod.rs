//! HTTP middleware for request processing and protection.
//!
//! Provides admission control and observability middleware.

pub mod rate_limit;
pub mod tracing;
