//! Text summary handed to whatever the user shares progress with.

use crate::pedometer::StepMetrics;

pub fn summary(metrics: &StepMetrics) -> String {
    format!(
        "🔥 StepPulse Update:\nI walked {} steps today!\nDistance: {} km\nCalories: {} kcal",
        metrics.steps,
        metrics.format_distance(),
        metrics.calories
    )
}
