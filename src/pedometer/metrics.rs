//! Activity estimates derived from a step count.

use crate::consts::cli_consts::{
    CALORIES_PER_STEP, MIN_PACE_DISTANCE_KM, STEPS_PER_MINUTE_AVG, STRIDE_LENGTH_METERS,
};
use std::fmt::{self, Display};

/// Estimated distance walked, in kilometers.
pub fn distance_km(steps: u64) -> f64 {
    steps as f64 * STRIDE_LENGTH_METERS / 1000.0
}

/// Estimated energy burned, in whole kilocalories.
pub fn calories(steps: u64) -> u64 {
    (steps as f64 * CALORIES_PER_STEP).floor() as u64
}

/// Estimated minutes spent walking at the assumed cadence.
pub fn active_minutes(steps: u64) -> u64 {
    steps / STEPS_PER_MINUTE_AVG
}

/// Minutes per kilometer, once enough distance has been covered to make the
/// estimate meaningful.
pub fn pace_min_per_km(steps: u64) -> Option<f64> {
    let distance = distance_km(steps);
    if distance > MIN_PACE_DISTANCE_KM {
        Some(active_minutes(steps) as f64 / distance)
    } else {
        None
    }
}

/// Fraction of the goal reached, clamped to `0.0..=1.0`.
pub fn goal_progress(steps: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 1.0;
    }
    (steps as f64 / goal as f64).min(1.0)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActiveTime {
    pub hours: u64,
    pub minutes: u64,
}

impl From<u64> for ActiveTime {
    fn from(total_minutes: u64) -> Self {
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl Display for ActiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// All estimates for one step count.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepMetrics {
    pub steps: u64,
    pub distance_km: f64,
    pub calories: u64,
    pub active_time: ActiveTime,
    pub pace_min_per_km: Option<f64>,
}

impl StepMetrics {
    pub fn from_steps(steps: u64) -> Self {
        Self {
            steps,
            distance_km: distance_km(steps),
            calories: calories(steps),
            active_time: ActiveTime::from(active_minutes(steps)),
            pace_min_per_km: pace_min_per_km(steps),
        }
    }

    pub fn format_distance(&self) -> String {
        format!("{:.2}", self.distance_km)
    }

    pub fn format_pace(&self) -> String {
        match self.pace_min_per_km {
            Some(pace) => format!("{:.0}' /km", pace),
            None => "-- /km".to_string(),
        }
    }
}

impl Default for StepMetrics {
    fn default() -> Self {
        Self::from_steps(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_thousand_steps() {
        assert!((distance_km(10_000) - 7.62).abs() < 1e-9);
        assert_eq!(calories(10_000), 400);
        assert_eq!(active_minutes(10_000), 100);

        let metrics = StepMetrics::from_steps(10_000);
        assert_eq!(metrics.format_distance(), "7.62");
        assert_eq!(metrics.active_time.to_string(), "1h 40m");
        assert_eq!(metrics.format_pace(), "13' /km");
    }

    #[test]
    fn calories_round_down() {
        assert_eq!(calories(0), 0);
        assert_eq!(calories(24), 0);
        assert_eq!(calories(25), 1);
        assert_eq!(calories(99), 3);
    }

    #[test]
    fn active_time_uses_integer_minutes() {
        assert_eq!(active_minutes(99), 0);
        assert_eq!(ActiveTime::from(active_minutes(6_050)).to_string(), "1h 0m");
        assert_eq!(ActiveTime::from(125).to_string(), "2h 5m");
    }

    #[test]
    // 131 steps is 0.0998 km, 132 steps is 0.1006 km.
    fn pace_needs_more_than_a_tenth_of_a_kilometer() {
        assert_eq!(pace_min_per_km(0), None);
        assert_eq!(pace_min_per_km(131), None);
        assert_eq!(StepMetrics::from_steps(131).format_pace(), "-- /km");

        let pace = pace_min_per_km(132).unwrap();
        assert!((pace - 1.0 / distance_km(132)).abs() < 1e-9);
    }

    #[test]
    fn metrics_are_pure() {
        for steps in [0, 1, 131, 132, 4_321, 10_000, 123_456] {
            assert_eq!(StepMetrics::from_steps(steps), StepMetrics::from_steps(steps));
        }
    }

    #[test]
    fn goal_progress_is_clamped() {
        assert_eq!(goal_progress(0, 10_000), 0.0);
        assert_eq!(goal_progress(5_000, 10_000), 0.5);
        assert_eq!(goal_progress(25_000, 10_000), 1.0);
        assert_eq!(goal_progress(3, 0), 1.0);
    }
}
