// HTTP request handlers
use crate::application::requests::{
    AnomalyPlacement, AnomalyRequest, CorrelationRequest, CostRequest, DepartmentRequest,
    FeatureRequest, PowerOverrides, PowerRequest, PredictionRequest, SeriesSpec, TrendRequest,
};
use crate::application::time_labels::build_time_labels;
use crate::domain::error::ensure_point_count;
use crate::domain::series::Granularity;
use crate::infrastructure::chunked_json::{ndjson_stream, stream_from_receiver};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use std::sync::Arc;

/// Wall-clock "now"; the only place the server reads the clock.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Deserialize)]
pub struct LabelsQuery {
    pub count: Option<usize>,
}

/// Flat form of `AnomalyRequest` for query strings: either `anomaly_hour`
/// or `window_start`/`window_end`.
#[derive(Deserialize)]
pub struct AnomalyQuery {
    pub base_value: Option<f64>,
    pub variance_percent: Option<f64>,
    pub anomaly_hour: Option<u32>,
    pub window_start: Option<u32>,
    pub window_end: Option<u32>,
}

impl AnomalyQuery {
    fn into_request(self) -> AnomalyRequest {
        let defaults = AnomalyRequest::default();
        let placement = match (self.anomaly_hour, self.window_start, self.window_end) {
            (Some(hour), _, _) => AnomalyPlacement::AtHour(hour),
            (None, None, None) => defaults.placement,
            (None, start, end) => AnomalyPlacement::Window {
                start_hour: start.unwrap_or(0),
                end_hour: end.unwrap_or(23),
            },
        };
        AnomalyRequest {
            base_value: self.base_value.unwrap_or(defaults.base_value),
            variance_percent: self.variance_percent.unwrap_or(defaults.variance_percent),
            placement,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Whole dashboard snapshot
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let dashboard = state.dashboard_service.get_dashboard(local_now());

    match json_response(&dashboard, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream dashboard (progressive loading)
pub async fn stream_dashboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard(local_now()).await;
    stream_from_receiver(rx)
}

/// One configured chart, freshly generated
pub async fn get_chart(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let chart = state.dashboard_service.get_chart(&id, local_now())?;

    Ok(match json_response(&chart, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    })
}

/// Live refresh of one configured chart
pub async fn live_chart(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let updates = state.streaming_service.live_chart(&id, local_now)?;
    Ok(match ndjson_stream(updates) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    })
}

pub async fn time_labels(
    Path(granularity): Path<Granularity>,
    Query(query): Query<LabelsQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let count = query.count.unwrap_or(12);
    ensure_point_count("count", count)?;
    Ok(Json(build_time_labels(count, granularity, local_now())))
}

pub async fn power_series(
    Path(granularity): Path<Granularity>,
    Query(overrides): Query<PowerOverrides>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let request = PowerRequest::from(PowerOverrides {
        granularity: Some(granularity),
        ..overrides
    });
    series_response(&state, &headers, SeriesSpec::Power(request)).await
}

pub async fn department_series(
    Query(request): Query<DepartmentRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Departments(request)).await
}

pub async fn prediction_series(
    Query(request): Query<PredictionRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Predictions(request)).await
}

pub async fn correlation_series(
    Query(request): Query<CorrelationRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Correlation(request)).await
}

pub async fn anomaly_series(
    Query(query): Query<AnomalyQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Anomalies(query.into_request())).await
}

pub async fn feature_series(
    Query(request): Query<FeatureRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::FeatureImportance(request)).await
}

pub async fn cost_series(
    Query(request): Query<CostRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Costs(request)).await
}

pub async fn quarterly_cost_series(
    Query(request): Query<CostRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::QuarterlyCosts(request)).await
}

pub async fn trend_series(
    Query(request): Query<TrendRequest>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    series_response(&state, &headers, SeriesSpec::Trend(request)).await
}

async fn series_response(
    state: &AppState,
    headers: &HeaderMap,
    spec: SeriesSpec,
) -> Result<Response, ApiError> {
    let payload = state.series_service.generate(&spec, local_now())?;

    Ok(match json_response(&payload, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    })
}
