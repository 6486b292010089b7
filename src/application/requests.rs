// Series requests - the knobs each builder accepts
//
// Every request deserializes with defaults, so a chart in the configuration
// file or a query string only names the fields it wants to change.
use crate::domain::error::{
    GeneratorError, ensure_at_most, ensure_finite, ensure_non_negative, ensure_point_count,
    ensure_range,
};
use crate::domain::series::Granularity;
use serde::{Deserialize, Serialize};

/// Fields a caller left out take the defaults of the requested granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PowerOverrides")]
pub struct PowerRequest {
    pub granularity: Granularity,
    pub count: usize,
    pub base_value: f64,
    pub variance_percent: f64,
    pub with_optimization: bool,
    /// Apply calendar-month seasonal factors (monthly series only).
    pub seasonal: bool,
}

impl PowerRequest {
    /// Defaults matching the power consumption chart for each time range.
    pub fn for_granularity(granularity: Granularity) -> Self {
        let (count, base_value, variance_percent, seasonal) = match granularity {
            Granularity::Hour => (24, 45.0, 20.0, false),
            Granularity::Day => (7, 320.0, 15.0, false),
            Granularity::Week => (4, 1500.0, 15.0, false),
            Granularity::Month => (12, 5000.0, 6.0, true),
        };
        Self {
            granularity,
            count,
            base_value,
            variance_percent,
            with_optimization: true,
            seasonal,
        }
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_point_count("count", self.count)?;
        ensure_non_negative("base_value", self.base_value)?;
        ensure_non_negative("variance_percent", self.variance_percent)
    }
}

impl Default for PowerRequest {
    fn default() -> Self {
        Self::for_granularity(Granularity::Hour)
    }
}

/// Partial power request, as written in configuration or a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerOverrides {
    pub granularity: Option<Granularity>,
    pub count: Option<usize>,
    pub base_value: Option<f64>,
    pub variance_percent: Option<f64>,
    pub with_optimization: Option<bool>,
    pub seasonal: Option<bool>,
}

impl From<PowerOverrides> for PowerRequest {
    fn from(overrides: PowerOverrides) -> Self {
        let defaults =
            PowerRequest::for_granularity(overrides.granularity.unwrap_or(Granularity::Hour));
        PowerRequest {
            count: overrides.count.unwrap_or(defaults.count),
            base_value: overrides.base_value.unwrap_or(defaults.base_value),
            variance_percent: overrides.variance_percent.unwrap_or(defaults.variance_percent),
            with_optimization: overrides
                .with_optimization
                .unwrap_or(defaults.with_optimization),
            seasonal: overrides.seasonal.unwrap_or(defaults.seasonal),
            ..defaults
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentRequest {
    pub count: usize,
    pub base_efficiency: f64,
    /// Maximum distance from `base_efficiency`, in percentage points.
    pub spread: f64,
}

impl DepartmentRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_non_negative("base_efficiency", self.base_efficiency)?;
        ensure_non_negative("spread", self.spread)
    }
}

impl Default for DepartmentRequest {
    fn default() -> Self {
        Self {
            count: 4,
            base_efficiency: 72.5,
            spread: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionRequest {
    pub base_value: f64,
    pub variance_percent: f64,
    /// Linear change of the monthly base per month of offset.
    pub drift_per_month: f64,
    pub past_months: usize,
    pub future_months: usize,
    pub optimized_ratio: f64,
}

impl PredictionRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_point_count("past_months", self.past_months)?;
        ensure_point_count("future_months", self.future_months)?;
        ensure_non_negative("base_value", self.base_value)?;
        ensure_non_negative("variance_percent", self.variance_percent)?;
        ensure_finite("drift_per_month", self.drift_per_month)?;
        ensure_non_negative("optimized_ratio", self.optimized_ratio)
    }
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            base_value: 49_500.0,
            variance_percent: 3.0,
            drift_per_month: 250.0,
            past_months: 3,
            future_months: 3,
            optimized_ratio: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationRequest {
    pub min_temperature: f64,
    pub peak_temperature: f64,
    pub temperature_jitter: f64,
    pub reference_temperature: f64,
    /// Consumption change per degree away from the reference.
    pub gain: f64,
    pub base_consumption: f64,
    pub variance_percent: f64,
}

impl CorrelationRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_range(self.min_temperature, self.peak_temperature)?;
        ensure_non_negative("temperature_jitter", self.temperature_jitter)?;
        ensure_finite("reference_temperature", self.reference_temperature)?;
        ensure_finite("gain", self.gain)?;
        ensure_non_negative("base_consumption", self.base_consumption)?;
        ensure_non_negative("variance_percent", self.variance_percent)
    }
}

impl Default for CorrelationRequest {
    fn default() -> Self {
        Self {
            min_temperature: 18.0,
            peak_temperature: 24.0,
            temperature_jitter: 1.0,
            reference_temperature: 20.0,
            gain: 2.0,
            base_consumption: 40.0,
            variance_percent: 12.5,
        }
    }
}

/// Where the single anomalous sample goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyPlacement {
    AtHour(u32),
    /// Uniformly among the sampled hours inside `start_hour..=end_hour`.
    Window { start_hour: u32, end_hour: u32 },
}

impl Default for AnomalyPlacement {
    fn default() -> Self {
        Self::AtHour(12)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyRequest {
    pub base_value: f64,
    pub variance_percent: f64,
    pub placement: AnomalyPlacement,
}

impl AnomalyRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_non_negative("base_value", self.base_value)?;
        ensure_non_negative("variance_percent", self.variance_percent)
    }
}

impl Default for AnomalyRequest {
    fn default() -> Self {
        Self {
            base_value: 40.0,
            variance_percent: 12.5,
            placement: AnomalyPlacement::default(),
        }
    }
}

/// Upper bound on `jitter`, in percentage points.
const MAX_FEATURE_JITTER: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRequest {
    /// Maximum perturbation of each target share, in percentage points.
    pub jitter: f64,
}

impl FeatureRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_non_negative("jitter", self.jitter)?;
        ensure_at_most("jitter", self.jitter, MAX_FEATURE_JITTER)
    }
}

impl Default for FeatureRequest {
    fn default() -> Self {
        Self { jitter: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRequest {
    pub months: usize,
    pub base_cost: f64,
    pub growth_percent: f64,
    pub variance_percent: f64,
    /// Index (oldest-first) of the first month with savings.
    pub implementation_month: usize,
    pub ramp_step_percent: f64,
    pub savings_cap_percent: f64,
}

impl CostRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_point_count("months", self.months)?;
        ensure_non_negative("base_cost", self.base_cost)?;
        ensure_finite("growth_percent", self.growth_percent)?;
        ensure_non_negative("variance_percent", self.variance_percent)?;
        ensure_non_negative("ramp_step_percent", self.ramp_step_percent)?;
        ensure_range(0.0, self.savings_cap_percent)?;
        ensure_range(self.savings_cap_percent, 100.0)
    }
}

impl Default for CostRequest {
    fn default() -> Self {
        Self {
            months: 12,
            base_cost: 600.0,
            growth_percent: 1.0,
            variance_percent: 5.0,
            implementation_month: 5,
            ramp_step_percent: 5.0,
            savings_cap_percent: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
    Volatile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendRequest {
    pub points: usize,
    pub min: f64,
    pub max: f64,
    pub trend: Trend,
    pub decimals: u32,
    pub granularity: Granularity,
}

impl TrendRequest {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        ensure_point_count("points", self.points)?;
        ensure_range(self.min, self.max)
    }
}

impl Default for TrendRequest {
    fn default() -> Self {
        Self {
            points: 12,
            min: 60.0,
            max: 85.0,
            trend: Trend::Up,
            decimals: 0,
            granularity: Granularity::Month,
        }
    }
}

/// A request for any series family, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesSpec {
    Power(PowerRequest),
    Departments(DepartmentRequest),
    Predictions(PredictionRequest),
    Correlation(CorrelationRequest),
    Anomalies(AnomalyRequest),
    FeatureImportance(FeatureRequest),
    Costs(CostRequest),
    QuarterlyCosts(CostRequest),
    Trend(TrendRequest),
}
