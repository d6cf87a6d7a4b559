//! Rolling window of step counts for the activity chart.

use crate::consts::cli_consts::chart::{
    EVERY_REFRESH_CAPACITY, MIN_PLOT_STEP_DELTA, STEP_DELTA_CAPACITY,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// When a new step count becomes a chart point.
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
pub enum ChartPolicy {
    /// Plot every reading; keep a short window.
    #[default]
    EveryRefresh,
    /// Plot only after the count moved by a minimum delta; keep a longer window.
    StepDelta,
}

impl ChartPolicy {
    pub fn capacity(&self) -> usize {
        match self {
            ChartPolicy::EveryRefresh => EVERY_REFRESH_CAPACITY,
            ChartPolicy::StepDelta => STEP_DELTA_CAPACITY,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub index: usize,
    pub value: u64,
}

/// Bounded sequence of points whose indices always run `0..len`.
#[derive(Debug, Clone)]
pub struct ChartBuffer {
    capacity: usize,
    points: VecDeque<ChartPoint>,
}

impl ChartBuffer {
    /// Creates an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a value, evicting the oldest point when full.
    pub fn append(&mut self, value: u64) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(ChartPoint {
            index: self.points.len(),
            value,
        });
        for (index, point) in self.points.iter_mut().enumerate() {
            point.index = index;
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

/// Applies a [`ChartPolicy`] in front of a [`ChartBuffer`].
#[derive(Debug, Clone)]
pub struct ChartFeed {
    policy: ChartPolicy,
    buffer: ChartBuffer,
    last_plotted: Option<u64>,
}

impl ChartFeed {
    pub fn new(policy: ChartPolicy) -> Self {
        Self {
            policy,
            buffer: ChartBuffer::new(policy.capacity()),
            last_plotted: None,
        }
    }

    pub fn policy(&self) -> ChartPolicy {
        self.policy
    }

    pub fn buffer(&self) -> &ChartBuffer {
        &self.buffer
    }

    /// Offers a step count to the chart. Returns whether it was plotted.
    pub fn record(&mut self, steps: u64) -> bool {
        let plot = match (self.policy, self.last_plotted) {
            (ChartPolicy::EveryRefresh, _) | (ChartPolicy::StepDelta, None) => true,
            (ChartPolicy::StepDelta, Some(last)) => steps.abs_diff(last) >= MIN_PLOT_STEP_DELTA,
        };
        if plot {
            self.buffer.append(steps);
            self.last_plotted = Some(steps);
        }
        plot
    }
}
