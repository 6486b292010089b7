// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::series_service::SeriesService;
use crate::application::streaming_service::StreamingDashboardService;

#[derive(Clone)]
pub struct AppState {
    pub series_service: SeriesService,
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
}
