//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use crate::error::ApiError;
use crate::users::{LastNameCount, User, UserQuery, UserStore};

/// Status page served at `/`.
pub const STATUS_PAGE: &str = include_str!("../../assets/index.html");

/// Runtime identity reported by `/info`.
pub const RUNTIME_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store answering every query route.
    pub store: Arc<dyn UserStore>,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// `/info` response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    /// Server runtime identity.
    pub node_version: String,
    /// `SELECT VERSION()` result.
    pub mysql_version: String,
}

/// `/user-count` response.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Status page.
pub async fn index() -> Html<&'static str> {
    Html(STATUS_PAGE)
}

/// Runtime and database versions.
pub async fn info(State(state): State<AppState>) -> Result<Json<InfoResponse>, ApiError> {
    let mysql_version = state.store.server_version().await?;

    Ok(Json(InfoResponse {
        node_version: RUNTIME_VERSION.to_string(),
        mysql_version,
    }))
}

/// Rows for one of the fixed list queries.
pub async fn list_users(state: AppState, query: UserQuery) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.store.users(query).await?;
    Ok(Json(users))
}

/// Total number of users.
pub async fn user_count(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
    let count = state.store.user_count().await?;
    Ok(Json(CountResponse { count }))
}

/// Users per last name, alphabetically.
pub async fn last_name_count(
    State(state): State<AppState>,
) -> Result<Json<Vec<LastNameCount>>, ApiError> {
    let counts = state.store.last_name_counts().await?;
    Ok(Json(counts))
}

/// User with the smallest id - 404 when the table is empty.
pub async fn first_user(State(state): State<AppState>) -> Result<Json<User>, ApiError> {
    state
        .store
        .first_user()
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Health check handler - always returns 200, never touches the database.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition - 404 when no recorder is attached.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
