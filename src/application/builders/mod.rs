// Shaped series builders, one per series family
pub mod anomalies;
pub mod correlation;
pub mod costs;
pub mod departments;
pub mod features;
pub mod power;
pub mod predictions;
pub mod trend;

pub use anomalies::build_anomaly_series;
pub use correlation::build_correlation_series;
pub use costs::{aggregate_quarters, build_cost_series};
pub use departments::build_department_efficiency;
pub use features::build_feature_importance;
pub use power::build_power_series;
pub use predictions::build_prediction_series;
pub use trend::build_trend_series;
