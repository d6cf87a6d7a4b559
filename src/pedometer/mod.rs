//! Step counting core
//!
//! Baseline reconciliation, derived metrics and the chart window. Nothing in
//! here touches the terminal or the sensor task.

pub mod chart;
pub mod metrics;
pub mod reconcile;
pub mod tracker;

pub use chart::ChartPolicy;
pub use metrics::StepMetrics;
pub use reconcile::RollbackPolicy;
pub use tracker::StepTracker;
