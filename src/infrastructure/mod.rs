//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Mapping store backends (PostgreSQL and in-memory)
//! - [`http`] - Outbound HTTP probing with `reqwest`
//! - [`metadata`] - Page metadata providers

pub mod http;
pub mod metadata;
pub mod persistence;
