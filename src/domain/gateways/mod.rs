//! Outbound capabilities the domain depends on.
//!
//! - [`HttpProbe`] - Single non-following HTTP request used to trace redirects
//! - [`MetadataProvider`] - Page title/description lookup for URL info

pub mod http_probe;
pub mod metadata_provider;

pub use http_probe::{HttpProbe, ProbeError, ProbeResponse};
pub use metadata_provider::{MetadataProvider, PageMetadata};

#[cfg(test)]
pub use http_probe::MockHttpProbe;
#[cfg(test)]
pub use metadata_provider::MockMetadataProvider;
