use crate::application::requests::{
    AnomalyRequest, CorrelationRequest, CostRequest, DepartmentRequest, FeatureRequest,
    PowerRequest, PredictionRequest, SeriesSpec,
};
use crate::domain::dashboard::ChartKind;
use crate::domain::series::Granularity;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub generator: GeneratorSettings,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Seed for a reproducible dashboard; entropy when absent.
    pub seed: Option<u64>,
    /// Simulated loading delay per widget while streaming.
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    /// Cadence of live chart refreshes.
    pub refresh_interval_ms: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            min_latency_ms: 500,
            max_latency_ms: 800,
            refresh_interval_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub tiles: Vec<TileConfig>,
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TileConfig {
    pub id: String,
    pub title: String,
    pub unit: String,
    #[serde(default)]
    pub precision: u32,
    pub base_value: f64,
    #[serde(default)]
    pub variance_percent: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub series: SeriesSpec,
}

impl DashboardConfig {
    pub fn chart(&self, id: &str) -> Option<&ChartConfig> {
        self.charts.iter().find(|c| c.id == id)
    }
}

impl Default for DashboardConfig {
    /// The factory overview: metric cards plus one chart per series family.
    fn default() -> Self {
        let tile = |id: &str, title: &str, unit: &str, precision, base_value, variance_percent| {
            TileConfig {
                id: id.to_string(),
                title: title.to_string(),
                unit: unit.to_string(),
                precision,
                base_value,
                variance_percent,
            }
        };
        let chart = |id: &str, title: &str, unit: Option<&str>, kind, series| ChartConfig {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            kind,
            series,
        };

        Self {
            title: "Factory Energy Overview".to_string(),
            tiles: vec![
                tile("power", "Power Consumption", "kWh", 0, 2456.0, 12.5),
                tile("savings", "Cost Savings", "$", 0, 4350.0, 8.3),
                tile("efficiency", "Average Efficiency", "%", 1, 72.5, 5.0),
            ],
            charts: vec![
                chart(
                    "power-hourly",
                    "Power Consumption",
                    Some("kWh"),
                    ChartKind::Area,
                    SeriesSpec::Power(PowerRequest::for_granularity(Granularity::Hour)),
                ),
                chart(
                    "power-daily",
                    "Daily Power Consumption",
                    Some("kWh"),
                    ChartKind::Area,
                    SeriesSpec::Power(PowerRequest::for_granularity(Granularity::Day)),
                ),
                chart(
                    "departments",
                    "Factory Performance",
                    Some("%"),
                    ChartKind::Bar,
                    SeriesSpec::Departments(DepartmentRequest::default()),
                ),
                chart(
                    "predictions",
                    "Consumption Forecast",
                    Some("kWh"),
                    ChartKind::Line,
                    SeriesSpec::Predictions(PredictionRequest::default()),
                ),
                chart(
                    "correlation",
                    "Temperature vs Consumption",
                    None,
                    ChartKind::Line,
                    SeriesSpec::Correlation(CorrelationRequest::default()),
                ),
                chart(
                    "anomalies",
                    "Anomaly Detection",
                    Some("kWh"),
                    ChartKind::Line,
                    SeriesSpec::Anomalies(AnomalyRequest::default()),
                ),
                chart(
                    "features",
                    "Consumption Drivers",
                    Some("%"),
                    ChartKind::Pie,
                    SeriesSpec::FeatureImportance(FeatureRequest::default()),
                ),
                chart(
                    "costs",
                    "Cost Analysis",
                    Some("$"),
                    ChartKind::Bar,
                    SeriesSpec::Costs(CostRequest::default()),
                ),
            ],
        }
    }
}

/// Load `config/dashboard.toml` (optional) overlaid with `DASHBOARD__*`
/// environment variables, e.g. `DASHBOARD__GENERATOR__SEED=7`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
