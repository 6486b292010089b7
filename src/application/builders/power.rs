// Power consumption series - one builder for every time range
use crate::application::random_source::{RandomSource, fluctuate, random_in_range};
use crate::application::requests::PowerRequest;
use crate::application::time_labels::{build_time_axis, format_label};
use crate::domain::bounds::clamp_all;
use crate::domain::error::GeneratorError;
use crate::domain::series::{Granularity, PowerPoint};
use chrono::{Datelike, NaiveDateTime, Weekday};

/// Calendar-month multipliers, January first; highest over the summer.
pub const SEASONAL_FACTORS: [f64; 12] = [0.9, 0.85, 0.8, 0.85, 0.9, 1.1, 1.2, 1.2, 1.0, 0.9, 0.95, 1.0];

const WEEKEND_FACTOR: f64 = 0.7;

/// How `predicted` and `optimized` are derived from `current`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerProfile {
    /// `predicted = current * (1 ± predicted_spread)`.
    pub predicted_spread: f64,
    /// `optimized = current * (1 - r)` with `r` in this range.
    pub savings_min: f64,
    pub savings_max: f64,
}

impl PowerProfile {
    pub fn for_granularity(granularity: Granularity) -> Self {
        let (predicted_spread, savings_min, savings_max) = match granularity {
            Granularity::Hour => (0.05, 0.10, 0.20),
            Granularity::Day => (0.05, 0.10, 0.25),
            Granularity::Week => (0.05, 0.15, 0.25),
            Granularity::Month => (0.03, 0.15, 0.25),
        };
        Self {
            predicted_spread,
            savings_min,
            savings_max,
        }
    }
}

/// Diurnal multiplier for an hour of day.
pub fn diurnal_factor(hour: u32) -> f64 {
    match hour {
        0..=5 => 0.6,
        7..=10 => 1.5,
        17..=21 => 1.8,
        _ => 1.0,
    }
}

pub fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
        _ => 1.0,
    }
}

/// Calendar-month factor, `month0` counted from zero.
pub fn seasonal_factor(month0: u32) -> f64 {
    SEASONAL_FACTORS[(month0 % 12) as usize]
}

/// Power series for the requested time range.
///
/// Hourly series cover a calendar day: point `i` is hour `i % 24`. Daily,
/// weekly and monthly series end at `now`.
pub fn build_power_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &PowerRequest,
    now: NaiveDateTime,
) -> Result<Vec<PowerPoint>, GeneratorError> {
    request.validate()?;
    let profile = PowerProfile::for_granularity(request.granularity);

    let slots: Vec<(String, Option<NaiveDateTime>, f64)> = match request.granularity {
        Granularity::Hour => (0..request.count)
            .map(|i| {
                let hour = (i % 24) as u32;
                (format!("{hour}:00"), None, diurnal_factor(hour))
            })
            .collect(),
        granularity => build_time_axis(request.count, granularity, now)
            .into_iter()
            .enumerate()
            .map(|(index, instant)| {
                let shape = match granularity {
                    Granularity::Day => weekday_factor(instant.weekday()),
                    Granularity::Month if request.seasonal => seasonal_factor(instant.month0()),
                    _ => 1.0,
                };
                (format_label(instant, granularity, index), Some(instant), shape)
            })
            .collect(),
    };

    let points = slots
        .into_iter()
        .map(|(label, instant, shape)| {
            let current = (request.base_value * shape
                + fluctuate(rng, request.base_value, request.variance_percent))
            .round();
            let predicted = (current
                * (1.0 + random_in_range(rng, -profile.predicted_spread, profile.predicted_spread, 3)))
            .round();
            let optimized = request.with_optimization.then(|| {
                (current * (1.0 - random_in_range(rng, profile.savings_min, profile.savings_max, 3))).round()
            });
            let date = match request.granularity {
                Granularity::Day => instant.map(|i| i.date()),
                _ => None,
            };

            PowerPoint {
                label,
                date,
                current,
                predicted,
                optimized,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Generated {:?} power series with {} points",
        request.granularity,
        points.len()
    );

    Ok(clamp_all(points))
}
