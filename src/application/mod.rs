// Application layer - Use cases and series builders
pub mod builders;
pub mod dashboard_service;
pub mod normalize;
pub mod random_source;
pub mod requests;
pub mod series_service;
pub mod streaming_service;
pub mod time_labels;
