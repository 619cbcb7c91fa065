// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    bar_graph, dashboard_settings, get_dashboard, get_template, health_check, initial,
    invalidate_cache, list_dashboards, list_users,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/users", get(list_users))
        .route("/initial", get(initial))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboard-settings", get(dashboard_settings))
        .route("/dashboards/:key", get(get_dashboard))
        .route("/dashboards/:key/template", get(get_template))
        .route("/cache/invalidate", post(invalidate_cache))
        .route("/visualizations/bar", post(bar_graph))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
