// Series service - dispatches series requests to their builders
use crate::application::builders::{
    aggregate_quarters, build_anomaly_series, build_correlation_series, build_cost_series,
    build_department_efficiency, build_feature_importance, build_power_series,
    build_prediction_series, build_trend_series,
};
use crate::application::random_source::{RandomSource, random_in_range};
use crate::application::requests::SeriesSpec;
use crate::domain::error::GeneratorError;
use crate::domain::series::SeriesPayload;
use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to the process-wide random source.
pub type SharedRandomSource = Arc<Mutex<Box<dyn RandomSource>>>;

pub fn share_source(source: impl RandomSource + 'static) -> SharedRandomSource {
    Arc::new(Mutex::new(Box::new(source)))
}

#[derive(Clone)]
pub struct SeriesService {
    source: SharedRandomSource,
}

impl SeriesService {
    pub fn new(source: SharedRandomSource) -> Self {
        Self { source }
    }

    /// Generate a fresh series. Every call draws new randomness; nothing is
    /// cached between calls.
    pub fn generate(
        &self,
        spec: &SeriesSpec,
        now: NaiveDateTime,
    ) -> Result<SeriesPayload, GeneratorError> {
        let mut rng = self.lock();
        generate_with(&mut **rng, spec, now)
    }

    /// Uniform value in `[min, max]` from the shared source.
    pub fn draw(&self, min: f64, max: f64, decimals: u32) -> f64 {
        let mut rng = self.lock();
        random_in_range(&mut **rng, min, max, decimals)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        // A panic mid-draw leaves the generator usable; recover the guard.
        self.source.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run the builder matching `spec` against an explicit random source.
pub fn generate_with<R: RandomSource + ?Sized>(
    rng: &mut R,
    spec: &SeriesSpec,
    now: NaiveDateTime,
) -> Result<SeriesPayload, GeneratorError> {
    let payload = match spec {
        SeriesSpec::Power(request) => SeriesPayload::Power(build_power_series(rng, request, now)?),
        SeriesSpec::Departments(request) => {
            SeriesPayload::Departments(build_department_efficiency(rng, request)?)
        }
        SeriesSpec::Predictions(request) => {
            SeriesPayload::Predictions(build_prediction_series(rng, request, now)?)
        }
        SeriesSpec::Correlation(request) => {
            SeriesPayload::Correlation(build_correlation_series(rng, request)?)
        }
        SeriesSpec::Anomalies(request) => {
            SeriesPayload::Anomalies(build_anomaly_series(rng, request)?)
        }
        SeriesSpec::FeatureImportance(request) => {
            SeriesPayload::FeatureImportance(build_feature_importance(rng, request)?)
        }
        SeriesSpec::Costs(request) => SeriesPayload::Costs(build_cost_series(rng, request, now)?),
        SeriesSpec::QuarterlyCosts(request) => {
            let months = build_cost_series(rng, request, now)?;
            SeriesPayload::QuarterlyCosts(aggregate_quarters(&months))
        }
        SeriesSpec::Trend(request) => SeriesPayload::Trend(build_trend_series(rng, request, now)?),
    };
    Ok(payload)
}
