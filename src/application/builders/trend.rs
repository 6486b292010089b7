// Bounded random walk with a direction
use crate::application::random_source::{RandomSource, random_in_range};
use crate::application::requests::{Trend, TrendRequest};
use crate::application::time_labels::build_time_labels;
use crate::domain::error::GeneratorError;
use crate::domain::series::TrendPoint;
use chrono::NaiveDateTime;

/// Per-step change bounds as fractions of the range width.
fn step_bounds(trend: Trend) -> (f64, f64) {
    match trend {
        Trend::Up => (0.0, 0.05),
        Trend::Down => (-0.05, 0.0),
        Trend::Stable => (-0.02, 0.02),
        Trend::Volatile => (-0.08, 0.08),
    }
}

/// `points` values inside `[min, max]`, starting anywhere in the range.
pub fn build_trend_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &TrendRequest,
    now: NaiveDateTime,
) -> Result<Vec<TrendPoint>, GeneratorError> {
    request.validate()?;

    let span = request.max - request.min;
    let (low, high) = step_bounds(request.trend);
    let mut current = random_in_range(rng, request.min, request.max, request.decimals);

    let points = build_time_labels(request.points, request.granularity, now)
        .into_iter()
        .map(|label| {
            let point = TrendPoint {
                label,
                value: current,
            };
            let change = random_in_range(rng, span * low, span * high, request.decimals);
            current = (current + change).clamp(request.min, request.max);
            point
        })
        .collect();

    Ok(points)
}
