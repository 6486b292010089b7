// Temperature versus consumption over a day
use crate::application::random_source::{RandomSource, fluctuate, random_in_range};
use crate::application::requests::CorrelationRequest;
use crate::domain::bounds::clamp_all;
use crate::domain::error::GeneratorError;
use crate::domain::series::{CorrelationPoint, pearson_correlation};

/// Two-hour samples across one day.
pub const SAMPLE_HOURS: [u32; 12] = [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22];

const MIDDAY: f64 = 12.0;

/// Triangular day curve: `min` at midnight, `peak` at noon.
pub fn day_temperature(hour: u32, min: f64, peak: f64) -> f64 {
    let distance = (f64::from(hour) - MIDDAY).abs() / MIDDAY;
    min + (peak - min) * (1.0 - distance)
}

pub fn build_correlation_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &CorrelationRequest,
) -> Result<Vec<CorrelationPoint>, GeneratorError> {
    request.validate()?;

    let points = SAMPLE_HOURS
        .iter()
        .map(|&hour| {
            let jitter = random_in_range(
                rng,
                -request.temperature_jitter,
                request.temperature_jitter,
                1,
            );
            let temperature =
                day_temperature(hour, request.min_temperature, request.peak_temperature) + jitter;
            let temperature = (temperature * 10.0).round() / 10.0;

            let consumption = request.base_consumption
                + (temperature - request.reference_temperature) * request.gain
                + fluctuate(rng, request.base_consumption, request.variance_percent);

            CorrelationPoint {
                hour: format!("{hour}:00"),
                temperature,
                consumption: consumption.round(),
            }
        })
        .collect();
    let points = clamp_all(points);

    tracing::debug!(
        "Generated correlation series, r = {:?}",
        pearson_correlation(&points)
    );
    Ok(points)
}
