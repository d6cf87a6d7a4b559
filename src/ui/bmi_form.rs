//! BMI calculator screen.

use crate::bmi::{self, BmiCategory, BmiReading};
use crate::ui::notice::Notice;
use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Weight,
    Height,
}

/// What the app should do after a key press on the form.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormAction {
    Stay,
    Back,
}

#[derive(Debug)]
pub struct BmiForm {
    pub weight: String,
    pub height: String,
    pub focus: Field,
    result: Option<BmiReading>,
    notice: Option<Notice>,
}

impl Default for BmiForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BmiForm {
    pub fn new() -> Self {
        Self {
            weight: String::new(),
            height: String::new(),
            focus: Field::Weight,
            result: None,
            notice: None,
        }
    }

    pub fn result(&self) -> Option<&BmiReading> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormAction {
        match code {
            KeyCode::Esc => return FormAction::Back,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Weight => Field::Height,
                    Field::Height => Field::Weight,
                };
            }
            KeyCode::Enter => self.calculate(),
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !c.is_control() => self.focused_mut().push(c),
            _ => {}
        }
        FormAction::Stay
    }

    /// Computes the BMI from the entered text. A rejected input leaves the
    /// previous result on screen and shows why.
    pub fn calculate(&mut self) {
        match bmi::calculate(&self.weight, &self.height) {
            Ok(reading) => {
                log::debug!("BMI calculated: {}", reading);
                self.result = Some(reading);
                self.notice = None;
            }
            Err(e) => {
                log::debug!("BMI input rejected: {}", e);
                self.notice = Some(Notice::short(e.notice()));
            }
        }
    }

    pub fn update(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Weight => &mut self.weight,
            Field::Height => &mut self.height,
        }
    }
}

fn category_color(category: BmiCategory) -> Color {
    match category {
        BmiCategory::Underweight => Color::LightBlue,
        BmiCategory::Normal => Color::LightGreen,
        BmiCategory::Overweight => Color::LightYellow,
        BmiCategory::Obese => Color::LightRed,
    }
}

fn input_box<'a>(title: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let border_color = if focused { Color::LightYellow } else { Color::DarkGray };
    let cursor = if focused { "_" } else { "" };
    Paragraph::new(format!("{}{}", value, cursor)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color)),
    )
}

pub fn render_bmi_form(f: &mut Frame, form: &BmiForm, with_background_color: bool) {
    if with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let outer = Block::default()
        .title("BMI CALCULATOR")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    let inner = outer.inner(f.area());
    f.render_widget(outer, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

    f.render_widget(
        input_box("Weight (kg)", &form.weight, form.focus == Field::Weight),
        chunks[0],
    );
    f.render_widget(
        input_box("Height (cm)", &form.height, form.focus == Field::Height),
        chunks[1],
    );

    let result_line = match form.result() {
        Some(reading) => Line::from(vec![
            Span::styled("BMI: ", Style::default().fg(Color::Gray)),
            Span::styled(
                reading.to_string(),
                Style::default()
                    .fg(category_color(reading.category))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            "Enter your weight and height, then press Enter",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        Paragraph::new(result_line).alignment(Alignment::Center),
        chunks[2],
    );

    let (footer_text, footer_color) = match form.notice() {
        Some(notice) => (notice.text.clone(), Color::LightYellow),
        None => (
            "[Tab] Switch field | [Enter] Calculate | [Esc] Back".to_string(),
            Color::Cyan,
        ),
    };
    f.render_widget(
        Paragraph::new(footer_text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(footer_color)
                    .add_modifier(Modifier::BOLD),
            ),
        chunks[4],
    );
}
