//! Session state for the step dashboard.

use super::chart::{ChartBuffer, ChartFeed, ChartPolicy};
use super::metrics::StepMetrics;
use super::reconcile::{RollbackPolicy, StepReconciler};
use crate::storage::BaselineStore;
use std::fmt::{self, Display};

/// State after processing one reading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Snapshot {
    /// Raw counter value the snapshot was computed from.
    pub cumulative: u64,
    pub steps: u64,
    pub metrics: StepMetrics,
    pub rollback_detected: bool,
    pub baseline_established: bool,
    /// A chart point was added for this reading.
    pub plotted: bool,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Steps: {} | Distance: {} km | Calories: {} kcal | Active: {} | Pace: {}",
            self.steps,
            self.metrics.format_distance(),
            self.metrics.calories,
            self.metrics.active_time,
            self.metrics.format_pace()
        )?;
        if self.rollback_detected {
            write!(f, " (counter below baseline)")?;
        }
        Ok(())
    }
}

/// Owns everything the dashboard shows about steps; the screen only reads it.
pub struct StepTracker {
    reconciler: StepReconciler,
    chart: ChartFeed,
    latest: Option<Snapshot>,
}

impl StepTracker {
    pub fn new(
        store: Box<dyn BaselineStore>,
        rollback_policy: RollbackPolicy,
        chart_policy: ChartPolicy,
    ) -> Self {
        let reconciler = StepReconciler::new(store, rollback_policy);
        log::debug!(
            "Tracking steps with {} rollback and {} chart policies",
            reconciler.policy(),
            chart_policy
        );
        Self {
            reconciler,
            chart: ChartFeed::new(chart_policy),
            latest: None,
        }
    }

    /// Handles one sensor delivery.
    pub fn on_reading(&mut self, cumulative: u64) -> Snapshot {
        let reconciliation = self.reconciler.reconcile(cumulative);
        let plotted = self.chart.record(reconciliation.steps);
        let snapshot = Snapshot {
            cumulative,
            steps: reconciliation.steps,
            metrics: StepMetrics::from_steps(reconciliation.steps),
            rollback_detected: reconciliation.rollback_detected,
            baseline_established: reconciliation.baseline_established,
            plotted,
        };
        self.latest = Some(snapshot);
        snapshot
    }

    /// Latest snapshot, if any reading has arrived.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Step count shown on the dashboard; zero before the first reading.
    pub fn steps(&self) -> u64 {
        self.latest.map(|s| s.steps).unwrap_or(0)
    }

    pub fn metrics(&self) -> StepMetrics {
        self.latest.map(|s| s.metrics).unwrap_or_default()
    }

    pub fn chart(&self) -> &ChartBuffer {
        self.chart.buffer()
    }

    pub fn chart_policy(&self) -> ChartPolicy {
        self.chart.policy()
    }

    pub fn baseline(&self) -> Option<u64> {
        self.reconciler.baseline()
    }

    /// Clears the persisted baseline; counting restarts at the next reading.
    pub fn reset_baseline(&mut self) {
        self.reconciler.reset();
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockBaselineStore;

    fn tracker(baseline: Option<u64>, chart_policy: ChartPolicy) -> StepTracker {
        let mut store = MockBaselineStore::new();
        store
            .expect_load_baseline()
            .returning(move || Ok(baseline));
        store.expect_save_baseline().returning(|_| Ok(()));
        store.expect_clear_baseline().returning(|| Ok(()));
        StepTracker::new(Box::new(store), RollbackPolicy::Clamp, chart_policy)
    }

    #[test]
    fn empty_tracker_reports_zero() {
        let tracker = tracker(None, ChartPolicy::EveryRefresh);
        assert_eq!(tracker.steps(), 0);
        assert_eq!(tracker.metrics(), StepMetrics::from_steps(0));
        assert!(tracker.latest().is_none());
        assert!(tracker.chart().is_empty());
    }

    #[test]
    fn readings_flow_into_metrics_and_chart() {
        let mut tracker = tracker(Some(20_000), ChartPolicy::EveryRefresh);

        let snapshot = tracker.on_reading(30_000);
        assert_eq!(snapshot.steps, 10_000);
        assert_eq!(snapshot.metrics.calories, 400);
        assert!(snapshot.plotted);

        assert_eq!(tracker.steps(), 10_000);
        assert_eq!(tracker.chart().len(), 1);
        assert_eq!(tracker.baseline(), Some(20_000));
    }

    #[test]
    fn chart_is_capped_by_policy() {
        let mut tracker = tracker(Some(0), ChartPolicy::EveryRefresh);
        for counter in 0..20 {
            tracker.on_reading(counter);
        }
        assert_eq!(tracker.chart().len(), 7);
        let last: Vec<u64> = tracker.chart().points().map(|p| p.value).collect();
        assert_eq!(last, (13..20).collect::<Vec<_>>());
    }

    #[test]
    fn first_reading_sets_baseline() {
        let mut tracker = tracker(None, ChartPolicy::StepDelta);
        let snapshot = tracker.on_reading(987);
        assert!(snapshot.baseline_established);
        assert_eq!(snapshot.steps, 0);
        assert_eq!(tracker.on_reading(1_000).steps, 13);
    }

    #[test]
    fn reset_restarts_counting() {
        let mut tracker = tracker(Some(100), ChartPolicy::EveryRefresh);
        tracker.on_reading(500);
        tracker.reset_baseline();

        assert_eq!(tracker.steps(), 0);
        assert!(tracker.on_reading(600).baseline_established);
        assert_eq!(tracker.on_reading(650).steps, 50);
    }

    #[test]
    fn snapshot_line_lists_every_metric() {
        let mut walking = tracker(Some(0), ChartPolicy::EveryRefresh);
        let line = walking.on_reading(10_000).to_string();
        assert_eq!(
            line,
            "Steps: 10000 | Distance: 7.62 km | Calories: 400 kcal | Active: 1h 40m | Pace: 13' /km"
        );

        let mut rebooted = tracker(Some(50), ChartPolicy::EveryRefresh);
        let line = rebooted.on_reading(10).to_string();
        assert!(line.starts_with("Steps: 0 |"));
        assert!(line.ends_with("Pace: -- /km (counter below baseline)"));
    }
}
