//! Dashboard chart component
//!
//! Renders the rolling step window as a bar chart

use super::super::state::DashboardState;
use crate::pedometer::ChartPolicy;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

/// Render the step history chart.
pub fn render_chart(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let buffer = state.tracker.chart();
    let title = match state.tracker.chart_policy() {
        ChartPolicy::EveryRefresh => {
            format!("STEPS - {}/{} readings", buffer.len(), buffer.capacity())
        }
        ChartPolicy::StepDelta => {
            format!("STEPS - {}/{} changes", buffer.len(), buffer.capacity())
        }
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if buffer.is_empty() {
        let placeholder = Paragraph::new("No readings yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let bars: Vec<Bar> = buffer
        .points()
        .map(|point| {
            Bar::default()
                .value(point.value)
                .label(Line::from(point.index.to_string()))
                .style(Style::default().fg(Color::LightGreen))
        })
        .collect();

    // Spread the bars across the inner width, one column minimum
    let inner_width = area.width.saturating_sub(2);
    let count = buffer.capacity() as u16;
    let slot = (inner_width / count.max(1)).max(1);
    let (bar_width, bar_gap) = if slot > 2 { (slot - 1, 1) } else { (slot, 0) };

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(buffer.max_value().max(1))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightGreen));
    f.render_widget(chart, area);
}
