//! Domain layer containing entities, ports and the core algorithms.
//!
//! Nothing in here touches the network or a database directly. Side effects
//! go through the traits in [`repositories`] and [`gateways`], which the
//! infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Plain data: short links, redirect hops, verdicts
//! - [`repositories`] - Mapping store contract ([`repositories::LinkRepository`])
//! - [`gateways`] - Outbound capabilities (HTTP probing, page metadata)
//! - [`rate_limiter`] - Token bucket admission control
//! - [`classifier`] - Pattern-based URL risk classification
//! - [`qr_matrix`] - Deterministic 29x29 bitmap synthesis

pub mod classifier;
pub mod entities;
pub mod gateways;
pub mod qr_matrix;
pub mod rate_limiter;
pub mod repositories;
