use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};
use typetest::evaluator::{CharClass, CharView, LiveView};
use typetest::results::TestResults;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.state, self.results) {
            (AppState::Results, Some(results)) => render_results(&results, area, buf),
            _ => render_typing(self, area, buf),
        }
    }
}

/// Number of terminal rows the prompt needs at the given width
fn prompt_rows(prompt: &str, max_chars_per_line: u16) -> u16 {
    let width = max_chars_per_line.max(1) as f64;
    prompt
        .split('\n')
        .map(|line| ((line.width() as f64 / width).ceil() as u16).max(1))
        .sum()
}

fn char_style(view: &CharView) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let style = match view.class {
        CharClass::Correct => bold_style.fg(Color::Green),
        CharClass::Incorrect => bold_style.fg(Color::Red),
        CharClass::Untyped => bold_style.add_modifier(Modifier::DIM),
    };

    if view.is_cursor {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn prompt_lines(chars: &[CharView]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans = Vec::new();

    for view in chars {
        let style = char_style(view);
        match view.ch {
            '\n' => {
                spans.push(Span::styled("↵", style));
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            ' ' if view.class == CharClass::Incorrect => spans.push(Span::styled("·", style)),
            c => spans.push(Span::styled(c.to_string(), style)),
        }
    }

    lines.push(Line::from(spans));
    lines
}

fn status_line(view: &LiveView) -> String {
    format!(
        "{}s   {} wpm   {}% acc   {} errors",
        view.remaining_secs, view.metrics.speed, view.metrics.accuracy, view.metrics.errors
    )
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let dim_bold_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let view = app.evaluator.view();
    let prompt = app.evaluator.target();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let prompt_occupied_lines = prompt_rows(&prompt, max_chars_per_line);
    let padding = area.height.saturating_sub(prompt_occupied_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(1), // status
            Constraint::Length(1), // progress
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(status_line(&view), dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(view.progress.min(100) as u16)
        .render(chunks[2], buf);

    Paragraph::new(prompt_lines(&view.chars))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        // leading whitespace matters for code
        .wrap(Wrap { trim: false })
        .render(chunks[3], buf);

    let legend = if app.evaluator.has_started() {
        "(←) retry / (→) new / (esc)ape"
    } else {
        "start typing to begin / (→) new / (esc)ape"
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);
}

fn render_results(results: &TestResults, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(4), // results
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} wpm  ({})", results.metrics.speed, results.speed_rating()),
            bold_style.fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            format!(
                "{}% accuracy  ({})",
                results.metrics.accuracy,
                results.accuracy_rating()
            ),
            bold_style,
        )),
        Line::from(Span::styled(
            format!("{} errors", results.metrics.errors),
            bold_style,
        )),
        Line::from(Span::styled(
            format!("{} seconds", results.duration_secs),
            bold_style,
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style)).render(chunks[3], buf);
}
