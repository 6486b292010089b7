// Generator error taxonomy
use thiserror::Error;

/// Out-of-domain requests rejected before any value is generated.
///
/// Drawing random numbers never fails; everything here is a caller mistake
/// (or, for `DegenerateDistribution`, a distribution with nothing to share).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    #[error("{name} must not be negative (got {value})")]
    NegativeParameter { name: &'static str, value: f64 },

    #[error("{name} must be a finite number")]
    NonFiniteParameter { name: &'static str },

    #[error("{name} must be at most {max} (got {value})")]
    ParameterTooLarge { name: &'static str, value: f64, max: f64 },

    #[error("{name} asks for {value} points, the limit is {max}")]
    TooManyPoints {
        name: &'static str,
        value: usize,
        max: usize,
    },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("anomaly hour {hour} is not one of the sampled hours")]
    AnomalyOutsideSeries { hour: u32 },

    #[error("no sampled hour falls inside the anomaly window {start_hour}..={end_hour}")]
    EmptyAnomalyWindow { start_hour: u32, end_hour: u32 },

    #[error("cannot normalize a distribution whose weights sum to zero")]
    DegenerateDistribution,

    #[error("unknown chart '{0}'")]
    UnknownChart(String),
}

/// Reject NaN/infinite and negative values for a named parameter.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    ensure_finite(name, value)?;
    if value < 0.0 {
        return Err(GeneratorError::NegativeParameter { name, value });
    }
    Ok(())
}

pub fn ensure_finite(name: &'static str, value: f64) -> Result<(), GeneratorError> {
    if !value.is_finite() {
        return Err(GeneratorError::NonFiniteParameter { name });
    }
    Ok(())
}

/// Reject values above `max` (and non-finite ones).
pub fn ensure_at_most(name: &'static str, value: f64, max: f64) -> Result<(), GeneratorError> {
    ensure_finite(name, value)?;
    if value > max {
        return Err(GeneratorError::ParameterTooLarge { name, value, max });
    }
    Ok(())
}

/// Upper bound on the length of any generated series or axis.
pub const MAX_POINTS: usize = 10_000;

pub fn ensure_point_count(name: &'static str, value: usize) -> Result<(), GeneratorError> {
    if value > MAX_POINTS {
        return Err(GeneratorError::TooManyPoints {
            name,
            value,
            max: MAX_POINTS,
        });
    }
    Ok(())
}

pub fn ensure_range(min: f64, max: f64) -> Result<(), GeneratorError> {
    ensure_finite("min", min)?;
    ensure_finite("max", max)?;
    if min > max {
        return Err(GeneratorError::InvalidRange { min, max });
    }
    Ok(())
}
