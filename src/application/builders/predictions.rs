// Consumption forecast around the current month
use crate::application::random_source::{RandomSource, fluctuate};
use crate::application::requests::PredictionRequest;
use crate::application::time_labels::month_label;
use crate::domain::bounds::clamp_all;
use crate::domain::error::{GeneratorError, MAX_POINTS};
use crate::domain::series::PredictionPoint;
use chrono::NaiveDateTime;

const PREDICTED_SPREAD_PERCENT: f64 = 1.0;
const OPTIMIZED_SPREAD_PERCENT: f64 = 0.4;

fn month_offset(name: &'static str, months: usize) -> Result<i32, GeneratorError> {
    i32::try_from(months).map_err(|_| GeneratorError::TooManyPoints {
        name,
        value: months,
        max: MAX_POINTS,
    })
}

/// `past_months` of history followed by `future_months` starting at the
/// current month. Only history carries an `actual` value.
pub fn build_prediction_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &PredictionRequest,
    now: NaiveDateTime,
) -> Result<Vec<PredictionPoint>, GeneratorError> {
    request.validate()?;

    let past = month_offset("past_months", request.past_months)?;
    let future = month_offset("future_months", request.future_months)?;

    let points = (-past..future)
        .map(|offset| {
            let monthly_base = request.base_value
                + request.drift_per_month * f64::from(offset)
                + fluctuate(rng, request.base_value, request.variance_percent);
            let predicted = monthly_base + fluctuate(rng, monthly_base, PREDICTED_SPREAD_PERCENT);
            let optimized = monthly_base * request.optimized_ratio
                + fluctuate(rng, monthly_base, OPTIMIZED_SPREAD_PERCENT);

            PredictionPoint {
                month: month_label(now, offset),
                actual: (offset < 0).then(|| monthly_base.round()),
                predicted: predicted.round(),
                optimized: optimized.round(),
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!("Generated prediction window of {} months", points.len());
    Ok(clamp_all(points))
}
