//! Mapping store implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL `urls` table via SQLx
//! - [`InMemoryLinkRepository`] - Process-local map for development and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
