// Series domain models - one record type per series family
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Step size of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[serde(alias = "hourly")]
    Hour,
    #[serde(alias = "daily")]
    Day,
    #[serde(alias = "weekly")]
    Week,
    #[serde(alias = "monthly")]
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerPoint {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub current: f64,
    pub predicted: f64,
    pub optimized: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentEfficiency {
    pub name: String,
    pub color: String,
    /// Percentage, kept inside 0..=100.
    pub efficiency: f64,
    pub trend: String,
    /// Share of plant consumption, in percent.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPoint {
    pub month: String,
    /// `None` for months that have not happened yet.
    pub actual: Option<f64>,
    pub predicted: f64,
    pub optimized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPoint {
    pub hour: String,
    pub temperature: f64,
    pub consumption: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPoint {
    pub time: String,
    pub value: f64,
    pub normal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImportance {
    pub name: String,
    pub color: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPoint {
    pub month: String,
    pub energy_cost: f64,
    pub projected_cost: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyCost {
    pub quarter: String,
    pub energy_cost: f64,
    pub projected_cost: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

/// Any generated series, tagged with its family for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum SeriesPayload {
    Power(Vec<PowerPoint>),
    Departments(Vec<DepartmentEfficiency>),
    Predictions(Vec<PredictionPoint>),
    Correlation(Vec<CorrelationPoint>),
    Anomalies(Vec<AnomalyPoint>),
    FeatureImportance(Vec<FeatureImportance>),
    Costs(Vec<CostPoint>),
    QuarterlyCosts(Vec<QuarterlyCost>),
    Trend(Vec<TrendPoint>),
}

impl SeriesPayload {
    pub fn len(&self) -> usize {
        match self {
            Self::Power(points) => points.len(),
            Self::Departments(points) => points.len(),
            Self::Predictions(points) => points.len(),
            Self::Correlation(points) => points.len(),
            Self::Anomalies(points) => points.len(),
            Self::FeatureImportance(points) => points.len(),
            Self::Costs(points) => points.len(),
            Self::QuarterlyCosts(points) => points.len(),
            Self::Trend(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pearson correlation coefficient of temperature against consumption.
///
/// Returns `None` for fewer than two points or a constant column.
pub fn pearson_correlation(points: &[CorrelationPoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mean_t = points.iter().map(|p| p.temperature).sum::<f64>() / n;
    let mean_c = points.iter().map(|p| p.consumption).sum::<f64>() / n;

    let (mut cov, mut var_t, mut var_c) = (0.0, 0.0, 0.0);
    for p in points {
        let dt = p.temperature - mean_t;
        let dc = p.consumption - mean_c;
        cov += dt * dc;
        var_t += dt * dt;
        var_c += dc * dc;
    }

    if var_t == 0.0 || var_c == 0.0 {
        return None;
    }
    Some(cov / (var_t.sqrt() * var_c.sqrt()))
}
