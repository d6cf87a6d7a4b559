//! Step offset reconciliation.
//!
//! The platform counter reports steps since the last device boot. The app
//! counts from a persisted baseline instead, so the displayed count starts at
//! zero on first use and carries across app restarts.

use crate::storage::BaselineStore;
use serde::{Deserialize, Serialize};

/// What to do when the counter reads below the stored baseline.
///
/// This happens after a device reboot resets the platform counter.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RollbackPolicy {
    /// Report zero until the counter climbs past the baseline again.
    #[default]
    Clamp,
    /// Adopt the lower counter value as the new baseline.
    Rebase,
}

/// Outcome of reconciling one counter reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Steps counted since the baseline. Never negative.
    pub steps: u64,
    /// The counter was below the baseline for this reading.
    pub rollback_detected: bool,
    /// The baseline was (re)established by this reading.
    pub baseline_established: bool,
}

pub struct StepReconciler {
    store: Box<dyn BaselineStore>,
    baseline: Option<u64>,
    loaded: bool,
    policy: RollbackPolicy,
    in_rollback: bool,
}

impl StepReconciler {
    pub fn new(store: Box<dyn BaselineStore>, policy: RollbackPolicy) -> Self {
        Self {
            store,
            baseline: None,
            loaded: false,
            policy,
            in_rollback: false,
        }
    }

    /// The baseline in effect, once the first reading has been seen.
    pub fn baseline(&self) -> Option<u64> {
        self.baseline
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    /// Converts a cumulative counter value into the session step count.
    pub fn reconcile(&mut self, cumulative: u64) -> Reconciliation {
        if !self.loaded {
            self.loaded = true;
            self.baseline = match self.store.load_baseline() {
                Ok(baseline) => baseline,
                Err(e) => {
                    log::warn!("Could not read stored step baseline: {}", e);
                    None
                }
            };
        }

        let Some(baseline) = self.baseline else {
            self.establish(cumulative);
            log::info!("Step baseline established at {}", cumulative);
            return Reconciliation {
                steps: 0,
                rollback_detected: false,
                baseline_established: true,
            };
        };

        if cumulative >= baseline {
            if self.in_rollback {
                log::info!("Step counter back above baseline {}", baseline);
                self.in_rollback = false;
            }
            return Reconciliation {
                steps: cumulative - baseline,
                rollback_detected: false,
                baseline_established: false,
            };
        }

        match self.policy {
            RollbackPolicy::Clamp => {
                if !self.in_rollback {
                    log::warn!(
                        "Step counter {} is below baseline {}; device likely rebooted, reporting 0 until it catches up",
                        cumulative,
                        baseline
                    );
                    self.in_rollback = true;
                }
                Reconciliation {
                    steps: 0,
                    rollback_detected: true,
                    baseline_established: false,
                }
            }
            RollbackPolicy::Rebase => {
                log::warn!(
                    "Step counter {} is below baseline {}; rebasing",
                    cumulative,
                    baseline
                );
                self.establish(cumulative);
                Reconciliation {
                    steps: 0,
                    rollback_detected: true,
                    baseline_established: true,
                }
            }
        }
    }

    /// Forgets the baseline here and in the store. The next reading
    /// establishes a new one.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear_baseline() {
            log::warn!("Could not clear stored step baseline: {}", e);
        }
        self.baseline = None;
        self.loaded = true;
        self.in_rollback = false;
    }

    fn establish(&mut self, cumulative: u64) {
        self.baseline = Some(cumulative);
        // Fire-and-forget: the in-memory baseline stays authoritative.
        if let Err(e) = self.store.save_baseline(cumulative) {
            log::warn!("Could not persist step baseline {}: {}", cumulative, e);
        }
    }
}
