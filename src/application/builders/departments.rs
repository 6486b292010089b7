// Departmental efficiency
use crate::application::random_source::{RandomSource, random_in_range};
use crate::application::requests::DepartmentRequest;
use crate::domain::bounds::clamp_all;
use crate::domain::error::GeneratorError;
use crate::domain::series::DepartmentEfficiency;

/// Plant departments with their palette tokens, in display order.
pub const DEPARTMENTS: [(&str, &str); 6] = [
    ("Assembly Line", "bg-primary/80"),
    ("Packaging Unit", "bg-success/80"),
    ("Heating & Cooling", "bg-warning/80"),
    ("Quality Control", "bg-info/80"),
    ("Logistics", "bg-destructive/80"),
    ("Warehouse", "bg-purple-500/80"),
];

/// Efficiency per department; counts beyond the catalog are truncated.
pub fn build_department_efficiency<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &DepartmentRequest,
) -> Result<Vec<DepartmentEfficiency>, GeneratorError> {
    request.validate()?;

    if request.count > DEPARTMENTS.len() {
        tracing::debug!(
            "Requested {} departments, only {} exist",
            request.count,
            DEPARTMENTS.len()
        );
    }

    let departments = DEPARTMENTS
        .iter()
        .take(request.count)
        .map(|(name, color)| {
            let efficiency = random_in_range(
                rng,
                request.base_efficiency - request.spread,
                request.base_efficiency + request.spread,
                1,
            );
            let trend = random_in_range(rng, 0.5, 4.5, 1);
            let share = random_in_range(rng, 5.0, 45.0, 0);

            DepartmentEfficiency {
                name: name.to_string(),
                color: color.to_string(),
                efficiency,
                trend: format!("+{trend:.1}%"),
                share,
            }
        })
        .collect();

    Ok(clamp_all(departments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::random_source::SequenceSource;
    use crate::infrastructure::rng::StdRandomSource;

    #[test]
    fn test_four_departments_by_default() {
        let mut rng = StdRandomSource::seeded(21);
        let departments =
            build_department_efficiency(&mut rng, &DepartmentRequest::default()).unwrap();

        let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Assembly Line", "Packaging Unit", "Heating & Cooling", "Quality Control"]
        );
        for dept in &departments {
            assert!((62.5..=82.5).contains(&dept.efficiency));
            assert!(dept.trend.starts_with('+') && dept.trend.ends_with('%'));
            assert!((5.0..=45.0).contains(&dept.share));
        }
    }

    #[test]
    fn test_efficiency_is_clamped() {
        let mut rng = SequenceSource::new(vec![0.9999]);
        let request = DepartmentRequest {
            count: 2,
            base_efficiency: 95.0,
            spread: 10.0,
        };
        let departments = build_department_efficiency(&mut rng, &request).unwrap();
        assert!(departments.iter().all(|d| d.efficiency == 100.0));
        assert_eq!(departments[0].trend, "+4.5%");
    }

    #[test]
    fn test_count_truncates_to_catalog() {
        let mut rng = StdRandomSource::seeded(2);
        let request = DepartmentRequest {
            count: 10,
            ..DepartmentRequest::default()
        };
        let departments = build_department_efficiency(&mut rng, &request).unwrap();
        assert_eq!(departments.len(), 6);
        assert_eq!(departments[5].name, "Warehouse");
    }
}
