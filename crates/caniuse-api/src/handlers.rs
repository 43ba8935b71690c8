//! API Handlers
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use caniuse_badge::{badge_lines, BadgeError, Layout, RenderOptions};
use caniuse_core::{CompatError, MinimumBrowserVersion, Resolver, CANIUSE_VERSION};
use caniuse_registry::{filter_result, BrowserFilter};

use crate::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Feature parameter is required. Please provide at least one feature to check. Example: ?features=api:AbortController")]
    MissingFeatures,

    #[error("{0}")]
    InvalidLayout(String),

    #[error("Invalid filter \"{0}\". Or the filter did not match any browsers. Please provide a valid browser filter.")]
    NoMatchingBrowsers(String),

    #[error(transparent)]
    Compat(#[from] CompatError),

    #[error(transparent)]
    Badge(#[from] BadgeError),

    #[error(transparent)]
    Metrics(#[from] prometheus::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFeatures | ApiError::InvalidLayout(_) | ApiError::NoMatchingBrowsers(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Compat(CompatError::FeatureNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Compat(_) | ApiError::Badge(_) | ApiError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Label for the failure counter.
    fn reason(&self) -> &'static str {
        match self {
            ApiError::MissingFeatures => "missing_features",
            ApiError::InvalidLayout(_) => "invalid_layout",
            ApiError::NoMatchingBrowsers(_) => "no_matching_browsers",
            ApiError::Compat(CompatError::FeatureNotFound(_)) => "feature_not_found",
            ApiError::Compat(_) => "dataset",
            ApiError::Badge(_) => "render",
            ApiError::Metrics(_) => "metrics",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Parameters shared by the badge endpoints.
///
/// `features` and `filter` may repeat; `layout` is `vertical` or `horizontal`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BadgeQuery {
    pub features: Vec<String>,
    pub filters: Vec<String>,
    pub layout: Layout,
}

impl BadgeQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = BadgeQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "features" if !value.trim().is_empty() => query.features.push(value),
                "filter" => query.filters.push(value),
                "layout" => query.layout = value.parse().map_err(ApiError::InvalidLayout)?,
                _ => {}
            }
        }

        if query.features.is_empty() {
            return Err(ApiError::MissingFeatures);
        }
        Ok(query)
    }
}

fn resolve(state: &AppState, query: &BadgeQuery) -> Result<Vec<MinimumBrowserVersion>, ApiError> {
    let verdicts = Resolver::new(&state.dataset).get_lowest_version_for_features(&query.features)?;
    let filtered = filter_result(&query.filters, verdicts);
    if filtered.is_empty() {
        return Err(ApiError::NoMatchingBrowsers(query.filters.join(", ")));
    }
    Ok(filtered)
}

fn svg_response(status: StatusCode, svg: String) -> Response {
    (status, [(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}

fn record_failure(state: &AppState, err: &ApiError) {
    state.metrics.failure(err.reason());
    tracing::warn!(error = %err, status = %err.status(), "request failed");
}

pub async fn list_all_features(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    state.metrics.request("all-features");
    Json(Resolver::new(&state.dataset).get_list_of_features())
}

pub async fn list_filters(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.metrics.request("filters");
    let filters: Vec<Value> = BrowserFilter::ALL
        .iter()
        .map(|filter| json!({ "name": filter.name(), "browsers": filter.browsers() }))
        .collect();
    Json(Value::Array(filters))
}

pub async fn min_browser_version(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    state.metrics.request("min-browser-version");

    let rendered = BadgeQuery::from_pairs(pairs).and_then(|query| {
        let verdicts = resolve(&state, &query)?;
        let svg = state
            .badges
            .render_badge(&badge_lines(&verdicts), RenderOptions { layout: query.layout })?;
        Ok(svg)
    });

    match rendered {
        Ok(svg) => svg_response(StatusCode::OK, svg),
        Err(err) => {
            record_failure(&state, &err);
            if !matches!(err, ApiError::Compat(_)) {
                return err.into_response();
            }
            match state.badges.render_error(&err.to_string()) {
                Ok(svg) => svg_response(err.status(), svg),
                Err(_) => err.into_response(),
            }
        }
    }
}

pub async fn min_browser_version_json(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    state.metrics.request("min-browser-version.json");

    match BadgeQuery::from_pairs(pairs).and_then(|query| resolve(&state, &query)) {
        Ok(verdicts) => Json(verdicts).into_response(),
        Err(err) => {
            record_failure(&state, &err);
            (err.status(), Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": CANIUSE_VERSION,
            "features": state.dataset.len()
        })),
    )
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
