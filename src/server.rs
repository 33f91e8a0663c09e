//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, service wiring, and Axum server lifecycle.

use crate::application::services::{InspectionService, LinkService, RedirectResolver};
use crate::config::Config;
use crate::domain::classifier::PatternClassifier;
use crate::domain::rate_limiter::TokenBucketLimiter;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::http::ReqwestProbe;
use crate::infrastructure::metadata::NullMetadataProvider;
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::IdentifierAllocator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and `urls` table, or the in-memory store
/// - Outbound HTTP client for redirect tracing
/// - Shorten token bucket
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or schema creation fails
/// - The limiter settings are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = connect_repository(&config).await?;

    let state = build_state(&config, repository)?;

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Picks PostgreSQL when `DATABASE_URL` is set, otherwise the in-memory store.
async fn connect_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("DATABASE_URL not set, links are kept in memory");
        return Ok(Arc::new(InMemoryLinkRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let repository = PgLinkRepository::new(Arc::new(pool));
    repository
        .ensure_schema()
        .await
        .context("Failed to create urls table")?;

    Ok(Arc::new(repository))
}

/// Wires services around `repository`.
///
/// # Errors
///
/// Returns an error if the limiter settings or the HTTP client are invalid.
pub fn build_state(config: &Config, repository: Arc<dyn LinkRepository>) -> Result<AppState> {
    let link_service = LinkService::new(repository, Arc::new(IdentifierAllocator::new()))
        .with_max_attempts(config.short_id_max_attempts);

    let resolver_settings = config.resolver_settings();
    let probe = ReqwestProbe::new(resolver_settings.hop_timeout)
        .context("Failed to build HTTP client")?;
    let resolver = RedirectResolver::new(Arc::new(probe), resolver_settings);

    let inspection_service = InspectionService::new(
        Arc::new(resolver),
        Arc::new(PatternClassifier::default()),
        Arc::new(NullMetadataProvider::new()),
    );

    let shorten_limiter = TokenBucketLimiter::new(config.rate_limit_settings())
        .context("Invalid rate limit settings")?;

    Ok(AppState {
        link_service: Arc::new(link_service),
        inspection_service: Arc::new(inspection_service),
        shorten_limiter: Arc::new(shorten_limiter),
        public_base_url: config.public_base_url.clone(),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
