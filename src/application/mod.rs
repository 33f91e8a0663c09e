//! Application layer services implementing business logic.
//!
//! Services orchestrate domain algorithms and repository/gateway calls and
//! expose a small API to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and lookup
//! - [`services::redirect_resolver::RedirectResolver`] - Bounded redirect chain tracing
//! - [`services::inspection_service::InspectionService`] - Classification and URL info

pub mod services;
