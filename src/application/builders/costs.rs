// Energy cost and savings after the optimization roll-out
use crate::application::random_source::{RandomSource, fluctuate};
use crate::application::requests::CostRequest;
use crate::application::time_labels::build_time_labels;
use crate::domain::bounds::clamp_all;
use crate::domain::error::GeneratorError;
use crate::domain::series::{CostPoint, Granularity, QuarterlyCost};
use chrono::NaiveDateTime;

/// Savings percentage for the month at `index` (oldest first).
///
/// Zero before the implementation month, then one ramp step per month up to
/// the cap.
pub fn savings_percent(request: &CostRequest, index: usize) -> f64 {
    if index < request.implementation_month {
        return 0.0;
    }
    let active_months = (index - request.implementation_month + 1) as f64;
    (request.ramp_step_percent * active_months).min(request.savings_cap_percent)
}

/// Monthly costs ending at the current month.
///
/// Savings are a share of this call's fluctuated `energy_cost`, not of a fixed
/// historical baseline.
pub fn build_cost_series<R: RandomSource + ?Sized>(
    rng: &mut R,
    request: &CostRequest,
    now: NaiveDateTime,
) -> Result<Vec<CostPoint>, GeneratorError> {
    request.validate()?;
    let growth = 1.0 + request.growth_percent / 100.0;

    let points = build_time_labels(request.months, Granularity::Month, now)
        .into_iter()
        .enumerate()
        .map(|(index, month)| {
            let trend = request.base_cost * growth.powi(index as i32);
            let energy_cost =
                (trend + fluctuate(rng, request.base_cost, request.variance_percent)).round();
            let savings = (energy_cost * savings_percent(request, index) / 100.0).floor();

            CostPoint {
                month,
                energy_cost,
                projected_cost: energy_cost - savings,
                savings,
            }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Generated {} months of cost data, savings from month {}",
        points.len(),
        request.implementation_month
    );
    Ok(clamp_all(points))
}

/// Sum consecutive groups of three months into quarters `Q1`, `Q2`, ...
pub fn aggregate_quarters(months: &[CostPoint]) -> Vec<QuarterlyCost> {
    months
        .chunks(3)
        .enumerate()
        .map(|(index, chunk)| QuarterlyCost {
            quarter: format!("Q{}", index + 1),
            energy_cost: chunk.iter().map(|m| m.energy_cost).sum(),
            projected_cost: chunk.iter().map(|m| m.projected_cost).sum(),
            savings: chunk.iter().map(|m| m.savings).sum(),
        })
        .collect()
}
