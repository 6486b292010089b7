// Anomaly detection series - exactly one spiked sample per call
use super::correlation::SAMPLE_HOURS;
use crate::application::random_source::{RandomSource, fluctuate, random_in_range};
use crate::application::requests::{AnomalyPlacement, AnomalyRequest};
use crate::domain::bounds::clamp_all;
use crate::domain::error::GeneratorError;
use crate::domain::series::AnomalyPoint;

/// Anomalous samples sit 30-50% above their baseline.
pub const SPIKE_MIN: f64 = 1.3;
pub const SPIKE_MAX: f64 = 1.5;

/// Day/night baseline for an hour: night 1.0, working hours 1.625, midday 1.75.
pub fn baseline_factor(hour: u32) -> f64 {
    match hour {
        12..=14 => 1.75,
        8..=18 => 1.625,
        _ => 1.0,
    }
}

/// Index into `SAMPLE_HOURS` of the anomalous sample.
pub fn anomaly_index<R: RandomSource + ?Sized>(
    rng: &mut R,
    placement: AnomalyPlacement,
) -> Result<usize, GeneratorError> {
    match placement {
        AnomalyPlacement::AtHour(hour) => SAMPLE_HOURS
            .iter()
            .position(|&h| h == hour)
            .ok_or(GeneratorError::AnomalyOutsideSeries { hour }),
        AnomalyPlacement::Window {
            start_hour,
            end_hour,
        } => {
            let candidates: Vec<usize> = SAMPLE_HOURS
                .iter()
                .enumerate()
                .filter(|(_, h)| (start_hour..=end_hour).contains(*h))
                .map(|(index, _)| index)
                .collect();
            if candidates.is_empty() {
                return Err(GeneratorError::EmptyAnomalyWindow {
                    start_hour,
                    end_hour,
                });
            }
            let pick = (rng.next_unit() * candidates.len() as f64) as usize;
            Ok(candidates[pick.min(candidates.len() - 1)])
        }
    }
}

pub fn build_anomaly_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &AnomalyRequest,
) -> Result<Vec<AnomalyPoint>, GeneratorError> {
    request.validate()?;
    let anomalous = anomaly_index(rng, request.placement)?;

    let points = SAMPLE_HOURS
        .iter()
        .enumerate()
        .map(|(index, &hour)| {
            let baseline = request.base_value * baseline_factor(hour);
            let normal = index != anomalous;
            let value = if normal {
                baseline + fluctuate(rng, baseline, request.variance_percent)
            } else {
                baseline * random_in_range(rng, SPIKE_MIN, SPIKE_MAX, 2)
            };

            AnomalyPoint {
                time: format!("{hour}:00"),
                value: value.round(),
                normal,
            }
        })
        .collect();

    tracing::debug!("Generated anomaly series, spike at {}:00", SAMPLE_HOURS[anomalous]);
    Ok(clamp_all(points))
}
