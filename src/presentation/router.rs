// Route table for the dashboard API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    anomaly_series, correlation_series, cost_series, department_series, feature_series,
    get_chart, get_dashboard, health_check, live_chart, power_series, prediction_series,
    quarterly_cost_series, stream_dashboard, time_labels, trend_series,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Compression is handled in the JSON response builder, so no CompressionLayer here.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/charts/:id", get(get_chart))
        .route("/charts/:id/live", get(live_chart))
        .route("/labels/:granularity", get(time_labels))
        .route("/series/power/:granularity", get(power_series))
        .route("/series/departments", get(department_series))
        .route("/series/predictions", get(prediction_series))
        .route("/series/correlation", get(correlation_series))
        .route("/series/anomalies", get(anomaly_series))
        .route("/series/features", get(feature_series))
        .route("/series/costs", get(cost_series))
        .route("/series/costs/quarterly", get(quarterly_cost_series))
        .route("/series/trend", get(trend_series))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::series_service::{SeriesService, share_source};
    use crate::application::streaming_service::StreamingDashboardService;
    use crate::infrastructure::config::{DashboardConfig, GeneratorSettings};
    use crate::infrastructure::rng::StdRandomSource;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let series_service = SeriesService::new(share_source(StdRandomSource::seeded(21)));
        let dashboard_service =
            DashboardService::new(series_service.clone(), DashboardConfig::default());
        let streaming_service = StreamingDashboardService::new(
            dashboard_service.clone(),
            GeneratorSettings {
                seed: Some(21),
                min_latency_ms: 0,
                max_latency_ms: 2,
                refresh_interval_ms: 10,
            },
        );
        router(Arc::new(AppState {
            series_service,
            dashboard_service,
            streaming_service,
        }))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_snapshot() {
        let (status, body) = get_json("/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Factory Energy Overview");
        assert_eq!(body["tiles"].as_array().unwrap().len(), 3);
        assert_eq!(body["charts"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_dashboard_brotli() {
        let response = app()
            .oneshot(
                Request::get("/dashboard")
                    .header(header::ACCEPT_ENCODING, "br")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_power_series_query_overrides() {
        let (status, body) = get_json("/series/power/day?count=10&base_value=100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "power");
        let points = body["points"].as_array().unwrap();
        assert_eq!(points.len(), 10);
        assert!(points.iter().all(|p| p["date"].is_string()));
    }

    #[tokio::test]
    async fn test_labels() {
        let (status, body) = get_json("/labels/hourly?count=24").await;
        assert_eq!(status, StatusCode::OK);
        let hours: Vec<u32> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap().trim_end_matches(":00").parse().unwrap())
            .collect();
        assert_eq!(hours.len(), 24);
        // Consecutive hours ending at the current one, whatever the clock reads.
        for pair in hours.windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % 24);
        }
    }

    #[tokio::test]
    async fn test_oversized_counts_are_bad_requests() {
        for uri in [
            "/labels/day?count=10000000000000",
            "/series/power/hour?count=10000000000000",
            "/series/predictions?past_months=2147483648",
            "/series/costs?months=10000000000000",
            "/series/trend?points=10000000000000",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("limit"), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_extreme_feature_jitter_is_bad_request() {
        let (status, body) = get_json("/series/features?jitter=1e307").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("jitter"));
    }

    #[tokio::test]
    async fn test_power_defaults_follow_path_granularity() {
        let (status, body) = get_json("/series/power/month").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_feature_series_sums_to_hundred() {
        let (status, body) = get_json("/series/features").await;
        assert_eq!(status, StatusCode::OK);
        let total: u64 = body["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["value"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 100);
    }

    #[tokio::test]
    async fn test_anomaly_window_query() {
        let (status, body) = get_json("/series/anomalies?window_start=8&window_end=18").await;
        assert_eq!(status, StatusCode::OK);
        let points = body["points"].as_array().unwrap();
        let anomalies: Vec<_> = points.iter().filter(|p| !p["normal"].as_bool().unwrap()).collect();
        assert_eq!(anomalies.len(), 1);
    }

    #[tokio::test]
    async fn test_quarterly_costs() {
        let (status, body) = get_json("/series/costs/quarterly").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "quarterly_costs");
        assert_eq!(body["points"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_request_is_bad_request() {
        let (status, body) = get_json("/series/predictions?base_value=-5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("base_value"));
    }

    #[tokio::test]
    async fn test_anomaly_outside_series_is_bad_request() {
        let (status, _) = get_json("/series/anomalies?anomaly_hour=13").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_single_chart() {
        let (status, body) = get_json("/charts/departments").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "bar");
        assert_eq!(body["series"]["type"], "departments");

        let (status, _) = get_json("/charts/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_live_chart_is_not_found() {
        let (status, _) = get_json("/charts/missing/live").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_stream() {
        let response = app()
            .oneshot(Request::get("/dashboard/stream").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let messages: Vec<Value> = body
            .split(|b| *b == b'\n')
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_slice(l).unwrap())
            .collect();
        assert_eq!(messages.first().unwrap()["type"], "skeleton");
        assert_eq!(messages.last().unwrap()["type"], "complete");
    }
}
