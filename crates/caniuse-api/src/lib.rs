//! caniuse-api: HTTP service for minimum browser version badges
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use caniuse_badge::{templates::TemplatesFile, BadgeRenderer};
use caniuse_core::CompatDataset;

pub use config::ServerConfig;
use metrics::Metrics;

/// Read-only state shared by every request.
pub struct AppState {
    pub dataset: CompatDataset,
    pub badges: BadgeRenderer,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(dataset: CompatDataset, badges: BadgeRenderer) -> Result<Self, prometheus::Error> {
        Ok(Self {
            dataset,
            badges,
            metrics: Metrics::new()?,
        })
    }

    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let dataset = CompatDataset::load(&config.data_path)
            .with_context(|| format!("loading dataset from {}", config.data_path.display()))?;
        let templates = match &config.templates_path {
            Some(path) => TemplatesFile::load(path)?,
            None => TemplatesFile::embedded()?,
        };
        Ok(Self::new(dataset, BadgeRenderer::new(&templates)?)?)
    }
}

pub fn create_app(state: Arc<AppState>, debug: bool) -> Router {
    let router = Router::new()
        .route("/all-features", get(handlers::list_all_features))
        .route("/filters", get(handlers::list_filters))
        .route("/min-browser-version", get(handlers::min_browser_version))
        .route("/min-browser-version.json", get(handlers::min_browser_version_json))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state);

    let router = if debug {
        tracing::info!("Debug mode is enabled. CORS headers will not be set.");
        router
    } else {
        router.layer(axum::middleware::from_fn(middleware::security_headers))
    };

    router.layer(TraceLayer::new_for_http())
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state, config.debug);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;

    tracing::info!("caniuse API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
