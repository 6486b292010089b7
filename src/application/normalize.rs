// Distribution helpers shared by the builders

use crate::domain::error::GeneratorError;

/// Scale non-negative `weights` to integers that sum exactly to `total`.
///
/// Largest-remainder rounding: every share is floored, then the units lost to
/// flooring go to the largest fractional parts (earlier entries win ties).
pub fn normalize_to_total(weights: &[f64], total: u32) -> Result<Vec<u32>, GeneratorError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GeneratorError::DegenerateDistribution);
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err(GeneratorError::DegenerateDistribution);
    }

    let exact: Vec<f64> = weights
        .iter()
        .map(|w| w / sum * f64::from(total))
        .collect();
    let mut shares: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();

    let assigned: u32 = shares.iter().sum();
    let mut order: Vec<usize> = (0..exact.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });

    for &index in order.iter().take(total.saturating_sub(assigned) as usize) {
        shares[index] += 1;
    }

    Ok(shares)
}
