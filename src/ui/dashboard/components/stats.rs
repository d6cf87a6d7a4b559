//! Dashboard stats panel component
//!
//! Renders the step count and the estimates derived from it

use super::super::state::DashboardState;
use super::super::utils::format_session_clock;
use crate::sensor::SensorAvailability;

use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn stat_line<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Render the today panel.
pub fn render_stats_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let metrics = state.tracker.metrics();
    let available = state.availability() == SensorAvailability::Available;
    let mut lines = Vec::new();

    let steps_color = if available {
        Color::White
    } else {
        Color::DarkGray
    };
    lines.push(stat_line("Steps: ", state.steps_text(), steps_color));
    lines.push(stat_line(
        "Distance: ",
        format!("{} km", metrics.format_distance()),
        Color::LightCyan,
    ));
    lines.push(stat_line(
        "Calories: ",
        format!("{} kcal", metrics.calories),
        Color::LightYellow,
    ));
    lines.push(stat_line(
        "Active: ",
        metrics.active_time.to_string(),
        Color::LightGreen,
    ));
    lines.push(stat_line("Pace: ", metrics.format_pace(), Color::LightBlue));

    lines.push(Line::from(""));

    let sensor_text = match (&state.sensor_description, state.availability()) {
        (Some(description), SensorAvailability::Available) => description.clone(),
        (_, availability) => availability.to_string(),
    };
    lines.push(stat_line("Sensor: ", sensor_text, Color::Cyan));
    if let Some(baseline) = state.tracker.baseline() {
        lines.push(stat_line("Baseline: ", baseline.to_string(), Color::Gray));
    }

    if state.in_rollback() {
        lines.push(Line::from(Span::styled(
            "Counter below baseline",
            Style::default().fg(Color::LightRed),
        )));
    }

    let session_secs = state.start_time.elapsed().as_secs();
    lines.push(stat_line(
        "Session: ",
        format_session_clock(session_secs),
        Color::Gray,
    ));

    let block = Block::default()
        .title("TODAY")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
