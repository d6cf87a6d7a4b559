//! Dashboard header component
//!
//! Renders the title and daily goal gauge

use super::super::state::DashboardState;
use super::super::utils::get_sensor_state_color;
use crate::pedometer::metrics::goal_progress;
use crate::sensor::SensorAvailability;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and goal progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title_text = match state.sensor_state() {
        Some(sensor_state) => format!("STEPPULSE v{} - {}", version, sensor_state).to_uppercase(),
        None => format!("STEPPULSE v{}", version),
    };

    let title_color = match state.sensor_state() {
        Some(_) => get_sensor_state_color(state.sensor_state()),
        None => Color::Cyan,
    };

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = match state.availability() {
        SensorAvailability::Available => {
            let steps = state.tracker.steps();
            let progress = goal_progress(steps, state.daily_goal);
            let percent = (progress * 100.0) as u16;
            let color = if progress >= 1.0 {
                Color::LightGreen
            } else {
                Color::LightBlue
            };
            (
                format!(
                    "GOAL - {} / {} steps ({}%)",
                    steps, state.daily_goal, percent
                ),
                color,
                percent.min(100),
            )
        }
        _ => ("GOAL - waiting for step sensor".to_string(), Color::DarkGray, 0),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}
