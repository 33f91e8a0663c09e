//! Page metadata providers.

pub mod null_metadata;

pub use null_metadata::NullMetadataProvider;
