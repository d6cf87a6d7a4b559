//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::{SensorState, Source};
use ratatui::prelude::Color;

/// Get a ratatui color for an event based on where it came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Sensor => Color::Cyan,
        Source::Tracker => Color::Yellow,
        Source::Dashboard => Color::Green,
    }
}

pub fn get_sensor_state_color(state: Option<SensorState>) -> Color {
    match state {
        Some(SensorState::Listening) => Color::LightGreen,
        Some(SensorState::Paused) => Color::LightYellow,
        Some(SensorState::Ended) | None => Color::DarkGray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Format the time the dashboard has been open
pub fn format_session_clock(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
