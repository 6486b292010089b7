// Feature importance of the consumption model
use crate::application::normalize::normalize_to_total;
use crate::application::random_source::{RandomSource, random_in_range};
use crate::application::requests::FeatureRequest;
use crate::domain::error::GeneratorError;
use crate::domain::series::FeatureImportance;

/// Factors with their target share of 100 and palette token.
pub const FEATURES: [(&str, f64, &str); 5] = [
    ("Operating Hours", 35.0, "hsl(var(--primary))"),
    ("Ambient Temperature", 25.0, "hsl(var(--warning))"),
    ("Production Volume", 20.0, "hsl(var(--success))"),
    ("Machine Age", 12.0, "hsl(var(--info))"),
    ("Maintenance Frequency", 8.0, "hsl(var(--destructive))"),
];

const TOTAL_SHARE: u32 = 100;

pub fn build_feature_importance<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &FeatureRequest,
) -> Result<Vec<FeatureImportance>, GeneratorError> {
    request.validate()?;

    let perturbed: Vec<f64> = FEATURES
        .iter()
        .map(|(_, target, _)| {
            (target + random_in_range(rng, -request.jitter, request.jitter, 1)).max(0.0)
        })
        .collect();
    let shares = normalize_to_total(&perturbed, TOTAL_SHARE)?;

    Ok(FEATURES
        .iter()
        .zip(shares)
        .map(|((name, _, color), value)| FeatureImportance {
            name: name.to_string(),
            color: color.to_string(),
            value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random_source::SequenceSource;
    use crate::infrastructure::rng::StdRandomSource;

    #[test]
    fn test_shares_sum_to_one_hundred() {
        let mut rng = StdRandomSource::seeded(4);
        let first = build_feature_importance(&mut rng, &FeatureRequest::default()).unwrap();
        let second = build_feature_importance(&mut rng, &FeatureRequest::default()).unwrap();

        for features in [&first, &second] {
            assert_eq!(features.len(), 5);
            assert_eq!(features.iter().map(|f| f.value).sum::<u32>(), 100);
        }
        let names: Vec<_> = first.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names[0], "Operating Hours");
        assert_eq!(names[4], "Maintenance Frequency");
    }

    #[test]
    fn test_sum_holds_for_many_draws() {
        let mut rng = StdRandomSource::seeded(99);
        for _ in 0..200 {
            let features = build_feature_importance(&mut rng, &FeatureRequest::default()).unwrap();
            assert_eq!(features.iter().map(|f| f.value).sum::<u32>(), 100);
        }
    }

    #[test]
    fn test_no_jitter_keeps_targets() {
        let mut rng = SequenceSource::midpoint();
        let features = build_feature_importance(&mut rng, &FeatureRequest { jitter: 0.0 }).unwrap();
        let values: Vec<_> = features.iter().map(|f| f.value).collect();
        assert_eq!(values, vec![35, 25, 20, 12, 8]);
    }

    #[test]
    fn test_shares_stay_near_targets() {
        let mut rng = StdRandomSource::seeded(17);
        let features = build_feature_importance(&mut rng, &FeatureRequest::default()).unwrap();
        for (feature, (_, target, _)) in features.iter().zip(FEATURES.iter()) {
            assert!((f64::from(feature.value) - target).abs() <= 6.0);
        }
    }

    #[test]
    fn test_extreme_jitter() {
        let mut rng = SequenceSource::new(vec![0.99]);
        assert!(matches!(
            build_feature_importance(&mut rng, &FeatureRequest { jitter: 1e307 }),
            Err(GeneratorError::ParameterTooLarge { name: "jitter", .. })
        ));

        let features = build_feature_importance(&mut rng, &FeatureRequest { jitter: 100.0 }).unwrap();
        assert_eq!(features.iter().map(|f| f.value).sum::<u32>(), 100);
    }
}
