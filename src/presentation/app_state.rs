// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::visualization_service::VisualizationService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub visualization_service: VisualizationService,
}
