// Streaming dashboard service - Progressive loading and live refresh
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::{ChartSkeleton, StreamMessage, TileSkeleton};
use crate::domain::error::GeneratorError;
use crate::infrastructure::config::GeneratorSettings;
use chrono::NaiveDateTime;
use futures::stream::{Stream, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::IntervalStream;

const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard: DashboardService,
    settings: GeneratorSettings,
}

impl StreamingDashboardService {
    pub fn new(dashboard: DashboardService, settings: GeneratorSettings) -> Self {
        Self {
            dashboard,
            settings,
        }
    }

    /// Skeleton first, then one update per widget as its simulated load
    /// finishes, then a completion event once every widget has reported.
    pub async fn stream_dashboard(&self, now: NaiveDateTime) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let start_time = Instant::now();
        let config = self.dashboard.config();

        // 1. Build and send skeleton immediately
        let skeleton = StreamMessage::Skeleton {
            title: config.title.clone(),
            tiles: config
                .tiles
                .iter()
                .map(|t| TileSkeleton {
                    id: t.id.clone(),
                    title: t.title.clone(),
                    unit: t.unit.clone(),
                    precision: t.precision,
                })
                .collect(),
            charts: config
                .charts
                .iter()
                .map(|c| ChartSkeleton {
                    id: c.id.clone(),
                    title: c.title.clone(),
                    unit: c.unit.clone(),
                    kind: c.kind,
                })
                .collect(),
        };
        let _ = tx.send(skeleton).await;

        let mut handles = Vec::new();

        // 2. Spawn tasks for tiles
        for tile_config in &config.tiles {
            let tx = tx.clone();
            let dashboard = self.dashboard.clone();
            let tile_config = tile_config.clone();
            let latency = self.simulated_latency();

            handles.push(tokio::spawn(async move {
                tokio::time::sleep(latency).await;
                let tile = dashboard.generate_tile(&tile_config);
                let msg = StreamMessage::TileUpdate {
                    id: tile.id,
                    value: tile.value,
                };
                let _ = tx.send(msg).await;
            }));
        }

        // 3. Spawn tasks for charts
        for chart_config in &config.charts {
            let tx = tx.clone();
            let dashboard = self.dashboard.clone();
            let chart_config = chart_config.clone();
            let latency = self.simulated_latency();

            handles.push(tokio::spawn(async move {
                tokio::time::sleep(latency).await;
                let msg = match dashboard.generate_chart(&chart_config, now) {
                    Ok(chart) => StreamMessage::ChartUpdate {
                        id: chart.id,
                        series: chart.series,
                    },
                    Err(e) => {
                        tracing::warn!("Chart {} failed: {}", chart_config.id, e);
                        StreamMessage::ChartError {
                            id: chart_config.id,
                            error: e.to_string(),
                        }
                    }
                };
                let _ = tx.send(msg).await;
            }));
        }

        // 4. Completion once every widget task has finished
        let widgets = handles.len();
        tokio::spawn(async move {
            for result in futures::future::join_all(handles).await {
                if let Err(e) = result {
                    tracing::error!("Widget task failed: {}", e);
                }
            }

            let msg = StreamMessage::Complete {
                widgets,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(msg).await;
        });

        rx
    }

    /// Regenerate one chart every `refresh_interval_ms`, reading the current
    /// time from `clock` on each tick.
    pub fn live_chart<F>(
        &self,
        id: &str,
        clock: F,
    ) -> Result<impl Stream<Item = StreamMessage> + Send + use<F>, GeneratorError>
    where
        F: Fn() -> NaiveDateTime + Send + 'static,
    {
        let chart_config = self
            .dashboard
            .config()
            .chart(id)
            .cloned()
            .ok_or_else(|| GeneratorError::UnknownChart(id.to_string()))?;
        let dashboard = self.dashboard.clone();
        let period = Duration::from_millis(self.settings.refresh_interval_ms.max(1));

        tracing::debug!("Live refresh of chart {} every {:?}", chart_config.id, period);

        let ticks = IntervalStream::new(tokio::time::interval(period));
        Ok(ticks.map(move |_| match dashboard.generate_chart(&chart_config, clock()) {
            Ok(chart) => StreamMessage::ChartUpdate {
                id: chart.id,
                series: chart.series,
            },
            Err(e) => StreamMessage::ChartError {
                id: chart_config.id.clone(),
                error: e.to_string(),
            },
        }))
    }

    fn simulated_latency(&self) -> Duration {
        let min = self.settings.min_latency_ms as f64;
        let max = (self.settings.max_latency_ms as f64).max(min);
        let millis = self.dashboard.series().draw(min, max, 0);
        Duration::from_millis(millis as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::series_service::{SeriesService, share_source};
    use crate::infrastructure::config::DashboardConfig;
    use crate::infrastructure::rng::StdRandomSource;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn service(min_latency_ms: u64, max_latency_ms: u64) -> StreamingDashboardService {
        let series = SeriesService::new(share_source(StdRandomSource::seeded(6)));
        let dashboard = DashboardService::new(series, DashboardConfig::default());
        StreamingDashboardService::new(
            dashboard,
            GeneratorSettings {
                seed: Some(6),
                min_latency_ms,
                max_latency_ms,
                refresh_interval_ms: 10,
            },
        )
    }

    #[tokio::test]
    async fn test_stream_order() {
        let svc = service(0, 5);
        let config = DashboardConfig::default();
        let mut rx = svc.stream_dashboard(now()).await;

        let mut messages = Vec::new();
        while let Some(msg) = rx.recv().await {
            messages.push(msg);
        }

        let widgets = config.tiles.len() + config.charts.len();
        assert_eq!(messages.len(), widgets + 2);
        assert!(matches!(messages.first(), Some(StreamMessage::Skeleton { .. })));
        match messages.last() {
            Some(StreamMessage::Complete { widgets: n, .. }) => assert_eq!(*n, widgets),
            other => panic!("expected completion, got {other:?}"),
        }

        let chart_updates = messages
            .iter()
            .filter(|m| matches!(m, StreamMessage::ChartUpdate { .. }))
            .count();
        assert_eq!(chart_updates, config.charts.len());
    }

    #[tokio::test]
    async fn test_latency_is_simulated() {
        let svc = service(20, 30);
        let started = Instant::now();
        let mut rx = svc.stream_dashboard(now()).await;
        while rx.recv().await.is_some() {}
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_live_chart_refreshes() {
        let svc = service(0, 0);
        let stream = svc.live_chart("power-hourly", now).unwrap();
        let updates: Vec<_> = stream.take(3).collect().await;

        assert_eq!(updates.len(), 3);
        for update in &updates {
            match update {
                StreamMessage::ChartUpdate { id, series } => {
                    assert_eq!(id, "power-hourly");
                    assert_eq!(series.len(), 24);
                }
                other => panic!("unexpected message {other:?}"),
            }
        }
    }

    #[test]
    fn test_live_chart_unknown_id() {
        let svc = service(0, 0);
        assert!(matches!(
            svc.live_chart("missing", now),
            Err(GeneratorError::UnknownChart(_))
        ));
    }
}
