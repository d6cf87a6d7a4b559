//! Dashboard main renderer

use super::components::{chart, footer, header, logs, stats};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(40),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(main_chunks[1]);

    stats::render_stats_panel(f, content_chunks[0], state);
    logs::render_logs_panel(f, content_chunks[1], state);
    chart::render_chart(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::pedometer::{ChartPolicy, RollbackPolicy, StepTracker};
    use crate::sensor::SensorAvailability;
    use crate::storage::MockBaselineStore;
    use crate::ui::app::UIConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn dashboard() -> DashboardState {
        let mut store = MockBaselineStore::new();
        store.expect_load_baseline().returning(|| Ok(Some(2_000)));
        let tracker = StepTracker::new(
            Box::new(store),
            RollbackPolicy::Clamp,
            ChartPolicy::EveryRefresh,
        );
        DashboardState::new(tracker, Instant::now(), UIConfig::new(true, 10_000))
    }

    fn draw(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_live_metrics() {
        let mut state = dashboard();
        state.set_availability(SensorAvailability::Available, Some("simulated step counter"));
        state.add_event(Event::reading(12_000));
        state.update();

        let screen = draw(&state);
        assert!(screen.contains("STEPPULSE"));
        assert!(screen.contains("10000"));
        assert!(screen.contains("7.62 km"));
        assert!(screen.contains("400 kcal"));
        assert!(screen.contains("1h 40m"));
        assert!(screen.contains("13' /km"));
        assert!(screen.contains("simulated step counter"));
        assert!(screen.contains("Baseline: 2000"));
    }

    #[test]
    fn renders_na_without_a_sensor() {
        let mut state = dashboard();
        state.set_availability(SensorAvailability::Missing, None);
        state.update();

        let screen = draw(&state);
        assert!(screen.contains("Steps: N/A"));
        assert!(screen.contains("-- /km"));
        assert!(screen.contains("Step sensor not found on this device"));
        assert!(screen.contains("No readings yet"));
        assert!(!screen.contains("Baseline:"));
    }
}
