// Randomization primitives and the injectable random source
//
// Builders never reach for a global generator: every draw goes through a
// `RandomSource` handed in by the caller, so a seeded source makes any series
// reproducible.

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Uniform value in `[min, max]`, rounded to `decimals` places.
///
/// `min <= max` is a precondition; request validation guarantees it for
/// every caller inside the crate.
pub fn random_in_range<R: RandomSource + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
    decimals: u32,
) -> f64 {
    let value = rng.next_unit() * (max - min) + min;
    round_to(value, decimals)
}

/// Signed delta of at most `max_percent` percent of `base_value`.
///
/// Used additively: `value = base + fluctuate(rng, base, pct)`.
pub fn fluctuate<R: RandomSource + ?Sized>(rng: &mut R, base_value: f64, max_percent: f64) -> f64 {
    let percent = random_in_range(rng, -max_percent, max_percent, 1);
    base_value * (percent / 100.0)
}

/// Multiply-round-divide rounding.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round() / multiplier
}

/// Replays a fixed list of unit draws, cycling when exhausted.
#[cfg(test)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty());
        Self { values, index: 0 }
    }

    /// Every draw lands in the middle of its range, so all noise is zero.
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::rng::StdRandomSource;

    #[test]
    fn test_random_in_range_endpoints() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5, 0.9999]);
        assert_eq!(random_in_range(&mut rng, 10.0, 20.0, 0), 10.0);
        assert_eq!(random_in_range(&mut rng, 10.0, 20.0, 0), 15.0);
        assert_eq!(random_in_range(&mut rng, 10.0, 20.0, 0), 20.0);
    }

    #[test]
    fn test_random_in_range_decimals() {
        let mut rng = SequenceSource::new(vec![0.123456]);
        assert_eq!(random_in_range(&mut rng, 0.0, 1.0, 2), 0.12);
        assert_eq!(random_in_range(&mut rng, 0.0, 10.0, 1), 1.2);
    }

    #[test]
    fn test_random_in_range_stays_inside() {
        let mut rng = StdRandomSource::seeded(7);
        for _ in 0..1000 {
            let value = random_in_range(&mut rng, -3.5, 8.25, 2);
            assert!((-3.5..=8.25).contains(&value), "{value} escaped the range");
        }
    }

    #[test]
    fn test_fluctuate_bounds() {
        let mut rng = StdRandomSource::seeded(11);
        for base in [0.0, 1.0, 45.0, 5000.0] {
            for pct in [0.0, 5.0, 15.0, 20.0] {
                for _ in 0..200 {
                    let delta = fluctuate(&mut rng, base, pct);
                    assert!(delta.abs() <= base * pct / 100.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_fluctuate_extremes() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5]);
        assert_eq!(fluctuate(&mut rng, 200.0, 15.0), -30.0);
        assert_eq!(fluctuate(&mut rng, 200.0, 15.0), 0.0);
    }

    #[test]
    fn test_boxed_source_forwards() {
        let mut boxed: Box<dyn RandomSource> = Box::new(SequenceSource::new(vec![0.25]));
        assert_eq!(random_in_range(&mut boxed, 0.0, 100.0, 0), 25.0);
    }
}
