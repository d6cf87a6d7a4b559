//! Dashboard footer component
//!
//! Renders key hints, or the current notice while one is showing

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub const KEY_HINTS: &str =
    "[Q] Quit | [B] BMI | [S] Share | [P] Pause/Resume | [R] Re-check sensor";

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = match state.notice() {
        Some(notice) => (notice.text.clone(), Color::LightYellow),
        None => (KEY_HINTS.to_string(), Color::Cyan),
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
