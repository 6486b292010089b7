// Domain layer - generated records and their invariants
pub mod bounds;
pub mod dashboard;
pub mod error;
pub mod series;
