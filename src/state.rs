use std::sync::Arc;

use crate::application::services::{InspectionService, LinkService};
use crate::domain::rate_limiter::TokenBucketLimiter;
use crate::domain::repositories::LinkRepository;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub inspection_service: Arc<InspectionService>,
    /// Admission limiter guarding `POST /shorten`.
    pub shorten_limiter: Arc<TokenBucketLimiter>,
    /// Origin used in generated short URLs instead of the `Host` header.
    pub public_base_url: Option<String>,
}
