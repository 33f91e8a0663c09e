//! Repository trait definitions for the domain layer.
//!
//! The mapping store is the only durable state in the service. Its contract
//! lives here; implementations live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short id to original URL mapping
//!
//! # Testing
//!
//! A `mockall` mock is generated under `cfg(test)`. Integration tests under
//! `tests/` run against [`crate::infrastructure::persistence::InMemoryLinkRepository`].

pub mod link_repository;

pub use link_repository::{InsertError, LinkRepository, StorageError};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
