// Post-generation clamp stage
use super::series::{
    AnomalyPoint, CorrelationPoint, CostPoint, DepartmentEfficiency, PowerPoint, PredictionPoint,
};

/// A record with documented numeric bounds.
///
/// Builders run every record through `into_bounds` before returning it, so
/// randomized fluctuation can never leak an out-of-domain value.
pub trait Bounded: Sized {
    fn into_bounds(self) -> Self;
}

/// Apply the clamp stage to a whole series.
pub fn clamp_all<T: Bounded>(points: Vec<T>) -> Vec<T> {
    points.into_iter().map(Bounded::into_bounds).collect()
}

impl Bounded for PowerPoint {
    /// `current >= 0`, `predicted >= 0`, `0 <= optimized <= current`.
    fn into_bounds(mut self) -> Self {
        self.current = self.current.max(0.0);
        self.predicted = self.predicted.max(0.0);
        self.optimized = self.optimized.map(|o| o.clamp(0.0, self.current));
        self
    }
}

impl Bounded for DepartmentEfficiency {
    fn into_bounds(mut self) -> Self {
        self.efficiency = self.efficiency.clamp(0.0, 100.0);
        self.share = self.share.clamp(0.0, 100.0);
        self
    }
}

impl Bounded for PredictionPoint {
    fn into_bounds(mut self) -> Self {
        self.actual = self.actual.map(|a| a.max(0.0));
        self.predicted = self.predicted.max(0.0);
        self.optimized = self.optimized.max(0.0);
        self
    }
}

impl Bounded for CorrelationPoint {
    fn into_bounds(mut self) -> Self {
        self.consumption = self.consumption.max(0.0);
        self
    }
}

impl Bounded for AnomalyPoint {
    fn into_bounds(mut self) -> Self {
        self.value = self.value.max(0.0);
        self
    }
}

impl Bounded for CostPoint {
    /// `energy_cost >= 0`, `0 <= savings <= energy_cost`; projected cost
    /// follows from the two so `savings = energy_cost - projected_cost` holds.
    fn into_bounds(mut self) -> Self {
        self.energy_cost = self.energy_cost.max(0.0);
        self.savings = self.savings.clamp(0.0, self.energy_cost);
        self.projected_cost = self.energy_cost - self.savings;
        self
    }
}
