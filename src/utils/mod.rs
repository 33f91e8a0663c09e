//! Utility functions for id generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Short id allocation
//! - [`url_validation`] - Shorten grammar and outbound URL parsing
//! - [`request_origin`] - Serving origin detection from HTTP headers

pub mod code_generator;
pub mod request_origin;
pub mod url_validation;
