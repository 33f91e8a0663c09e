//! Business logic services for the application layer.

pub mod inspection_service;
pub mod link_service;
pub mod redirect_resolver;

pub use inspection_service::{InspectionService, UrlInfo};
pub use link_service::LinkService;
pub use redirect_resolver::{RedirectResolver, ResolveError, ResolverSettings};
