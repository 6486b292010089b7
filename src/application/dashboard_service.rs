// Dashboard service - Use case for building a dashboard snapshot
use crate::application::random_source::round_to;
use crate::application::series_service::SeriesService;
use crate::domain::dashboard::{ChartData, Dashboard, TileData};
use crate::domain::error::GeneratorError;
use crate::infrastructure::config::{ChartConfig, DashboardConfig, TileConfig};
use chrono::NaiveDateTime;

#[derive(Clone)]
pub struct DashboardService {
    series: SeriesService,
    dashboard_config: DashboardConfig,
}

impl DashboardService {
    pub fn new(series: SeriesService, dashboard_config: DashboardConfig) -> Self {
        Self {
            series,
            dashboard_config,
        }
    }

    /// Every tile and chart, freshly generated.
    ///
    /// A chart whose request is invalid is left out and logged; the rest of
    /// the dashboard still renders.
    pub fn get_dashboard(&self, now: NaiveDateTime) -> Dashboard {
        let tiles = self
            .dashboard_config
            .tiles
            .iter()
            .map(|tile_config| self.generate_tile(tile_config))
            .collect();

        let mut charts = Vec::new();
        for chart_config in &self.dashboard_config.charts {
            match self.generate_chart(chart_config, now) {
                Ok(chart) => charts.push(chart),
                Err(e) => {
                    tracing::warn!("Skipping chart {}: {}", chart_config.id, e);
                }
            }
        }

        Dashboard::new(self.dashboard_config.title.clone(), tiles, charts)
    }

    /// One configured chart by id.
    pub fn get_chart(&self, id: &str, now: NaiveDateTime) -> Result<ChartData, GeneratorError> {
        let chart_config = self
            .dashboard_config
            .chart(id)
            .ok_or_else(|| GeneratorError::UnknownChart(id.to_string()))?;
        self.generate_chart(chart_config, now)
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.dashboard_config
    }

    pub fn series(&self) -> &SeriesService {
        &self.series
    }

    pub fn generate_tile(&self, tile_config: &TileConfig) -> TileData {
        let spread = tile_config.base_value * tile_config.variance_percent / 100.0;
        let value = self.series.draw(
            tile_config.base_value - spread,
            tile_config.base_value + spread,
            tile_config.precision,
        );

        TileData::new(
            tile_config.id.clone(),
            tile_config.title.clone(),
            tile_config.unit.clone(),
            round_to(value, tile_config.precision),
            tile_config.precision,
        )
    }

    pub fn generate_chart(
        &self,
        chart_config: &ChartConfig,
        now: NaiveDateTime,
    ) -> Result<ChartData, GeneratorError> {
        let series = self.series.generate(&chart_config.series, now)?;
        tracing::debug!("Chart {} generated with {} points", chart_config.id, series.len());

        Ok(ChartData::new(
            chart_config.id.clone(),
            chart_config.title.clone(),
            chart_config.unit.clone(),
            chart_config.kind,
            series,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::requests::{PowerRequest, SeriesSpec};
    use crate::application::series_service::share_source;
    use crate::domain::dashboard::ChartKind;
    use crate::domain::series::SeriesPayload;
    use crate::infrastructure::rng::StdRandomSource;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(16, 45, 0)
            .unwrap()
    }

    fn service(config: DashboardConfig) -> DashboardService {
        DashboardService::new(SeriesService::new(share_source(StdRandomSource::seeded(10))), config)
    }

    #[test]
    fn test_default_dashboard_has_every_chart() {
        let config = DashboardConfig::default();
        let dashboard = service(config.clone()).get_dashboard(now());

        assert_eq!(dashboard.title, "Factory Energy Overview");
        assert_eq!(dashboard.tiles.len(), config.tiles.len());
        assert_eq!(dashboard.charts.len(), config.charts.len());
        assert!(dashboard.charts.iter().all(|c| !c.series.is_empty()));
    }

    #[test]
    fn test_tiles_stay_within_variance() {
        let config = DashboardConfig::default();
        let svc = service(config.clone());
        for _ in 0..50 {
            for tile_config in &config.tiles {
                let tile = svc.generate_tile(tile_config);
                let spread = tile_config.base_value * tile_config.variance_percent / 100.0;
                assert!(tile.value >= tile_config.base_value - spread - 0.5);
                assert!(tile.value <= tile_config.base_value + spread + 0.5);
            }
        }
    }

    #[test]
    fn test_invalid_chart_is_skipped() {
        let mut config = DashboardConfig::default();
        config.charts.push(ChartConfig {
            id: "broken".to_string(),
            title: "Broken".to_string(),
            unit: None,
            kind: ChartKind::Line,
            series: SeriesSpec::Power(PowerRequest {
                base_value: -1.0,
                ..PowerRequest::default()
            }),
        });
        let expected = config.charts.len() - 1;

        let dashboard = service(config).get_dashboard(now());
        assert_eq!(dashboard.charts.len(), expected);
        assert!(dashboard.charts.iter().all(|c| c.id != "broken"));
    }

    #[test]
    fn test_get_chart() {
        let svc = service(DashboardConfig::default());
        let chart = svc.get_chart("features", now()).unwrap();
        assert_eq!(chart.kind, ChartKind::Pie);
        match chart.series {
            SeriesPayload::FeatureImportance(features) => {
                assert_eq!(features.iter().map(|f| f.value).sum::<u32>(), 100)
            }
            other => panic!("unexpected payload {other:?}"),
        }

        assert_eq!(
            svc.get_chart("nope", now()).unwrap_err(),
            GeneratorError::UnknownChart("nope".to_string())
        );
    }
}
