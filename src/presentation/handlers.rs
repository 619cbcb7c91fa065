// HTTP request handlers
use crate::application::visualization_service::{BarGraphFigure, BarGraphRequest};
use crate::domain::dashboard::{Dashboard, DashboardSettings, InitialData, Template};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Upstream fetch failure, reported as 502
pub struct UpstreamError(anyhow::Error);

impl From<anyhow::Error> for UpstreamError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        tracing::error!("Upstream request failed: {:#}", self.0);
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": format!("{:#}", self.0) })),
        )
            .into_response()
    }
}

type HandlerResult<T> = Result<Json<T>, UpstreamError>;

#[derive(Deserialize)]
pub struct InvalidateRequest {
    pub key: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> HandlerResult<Value> {
    Ok(Json(state.dashboard_service.users().await?))
}

/// Bootstrap data: settings plus the user's organisation units
pub async fn initial(State(state): State<Arc<AppState>>) -> HandlerResult<InitialData> {
    Ok(Json(state.dashboard_service.initial().await?))
}

pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> HandlerResult<Vec<Dashboard>> {
    Ok(Json(state.dashboard_service.dashboards().await?))
}

pub async fn dashboard_settings(
    State(state): State<Arc<AppState>>,
) -> HandlerResult<DashboardSettings> {
    Ok(Json(state.dashboard_service.dashboard_settings().await?))
}

pub async fn get_dashboard(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> HandlerResult<Dashboard> {
    Ok(Json(state.dashboard_service.dashboard(&key).await?))
}

/// Dashboard with its category combination, when it references one
pub async fn get_template(
    Path(key): Path<String>,
    State(state): State<Arc<AppState>>,
) -> HandlerResult<Template> {
    Ok(Json(state.dashboard_service.template(&key).await?))
}

pub async fn invalidate_cache(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InvalidateRequest>,
) -> Json<Value> {
    let removed = state.dashboard_service.invalidate(&request.key).await;
    let remaining = state.dashboard_service.cached_entries().await;
    Json(json!({ "removed": removed, "remaining": remaining }))
}

pub async fn bar_graph(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BarGraphRequest>,
) -> Json<BarGraphFigure> {
    Json(state.visualization_service.bar_graph(&request))
}
