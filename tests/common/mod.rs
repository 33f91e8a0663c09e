#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use link_inspector::application::services::{
    InspectionService, LinkService, RedirectResolver, ResolverSettings,
};
use link_inspector::domain::classifier::PatternClassifier;
use link_inspector::domain::gateways::{HttpProbe, ProbeError, ProbeResponse};
use link_inspector::domain::rate_limiter::{ManualClock, RateLimitSettings, TokenBucketLimiter};
use link_inspector::domain::repositories::LinkRepository;
use link_inspector::infrastructure::metadata::NullMetadataProvider;
use link_inspector::infrastructure::persistence::InMemoryLinkRepository;
use link_inspector::state::AppState;
use link_inspector::utils::code_generator::IdentifierAllocator;

pub const BASE_URL: &str = "http://sho.rt";

/// Probe answering from a fixed table. Unknown URLs answer `200`.
#[derive(Default)]
pub struct ScriptedProbe {
    responses: HashMap<String, Result<ProbeResponse, ProbeError>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirect(mut self, from: &str, status: u16, to: &str) -> Self {
        self.responses
            .insert(from.to_string(), Ok(ProbeResponse::redirect(status, to)));
        self
    }

    pub fn fail(mut self, url: &str, error: ProbeError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }
}

#[async_trait]
impl HttpProbe for ScriptedProbe {
    async fn fetch(&self, url: &Url) -> Result<ProbeResponse, ProbeError> {
        self.responses
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(ProbeResponse::ok()))
    }
}

pub struct TestContext {
    pub state: AppState,
    pub clock: ManualClock,
    pub repository: Arc<InMemoryLinkRepository>,
}

pub fn create_test_state(probe: ScriptedProbe) -> TestContext {
    create_test_state_with(probe, Some(BASE_URL))
}

pub fn create_test_state_with(probe: ScriptedProbe, public_base_url: Option<&str>) -> TestContext {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let store: Arc<dyn LinkRepository> = repository.clone();
    let link_service = LinkService::new(store, Arc::new(IdentifierAllocator::new()));

    let resolver = RedirectResolver::new(
        Arc::new(probe),
        ResolverSettings {
            max_hops: 5,
            hop_timeout: Duration::from_secs(1),
            total_timeout: Duration::from_secs(5),
        },
    );
    let inspection_service = InspectionService::new(
        Arc::new(resolver),
        Arc::new(PatternClassifier::default()),
        Arc::new(NullMetadataProvider::new()),
    );

    let clock = ManualClock::new();
    let limiter = TokenBucketLimiter::with_clock(
        RateLimitSettings {
            capacity: 5,
            refill_rate: 1.0,
        },
        Arc::new(clock.clone()),
    )
    .unwrap();

    let state = AppState {
        link_service: Arc::new(link_service),
        inspection_service: Arc::new(inspection_service),
        shorten_limiter: Arc::new(limiter),
        public_base_url: public_base_url.map(str::to_string),
    };

    TestContext {
        state,
        clock,
        repository,
    }
}
