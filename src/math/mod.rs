pub mod anomaly;
pub mod intervals;
pub mod root_finding;
pub mod stats;
