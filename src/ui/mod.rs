pub mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::sync::OnceLock;

use crate::app::{App, Popup};
use crate::theme::Theme;
use components::Grid;

// Theme is installed once at startup; anything drawn before that uses defaults
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme used for all drawing. Only the first call has an effect.
pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialized");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn status() -> Color { theme().status }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }

fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Where the tiles are drawn inside a frame of the given size
pub fn grid_area(area: Rect) -> Rect {
    screen_chunks(area)[1]
}

pub fn draw(f: &mut Frame, app: &App) {
    let [info, grid, footer] = screen_chunks(f.area());

    draw_info_line(f, app, info);
    f.render_widget(Grid::new(&app.tiles, app.tile_size), grid);
    draw_footer(f, footer);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message > last gesture > ready
    let message = if let Some(ref status_msg) = app.status_message {
        Span::styled(status_msg.as_str(), Style::default().fg(status()))
    } else if let Some(ref gesture) = app.last_gesture {
        Span::styled(gesture.as_str(), Style::default().fg(text()))
    } else {
        Span::styled("Ready", Style::default().fg(text_dim()))
    };

    let line = Line::from(vec![
        Span::styled(
            app.swiping_state.to_string(),
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(text_dim())),
        message,
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints = vec![
        Span::styled("drag", Style::default().fg(accent())),
        Span::styled(" swipe  ", Style::default().fg(text_dim())),
        Span::styled("?", Style::default().fg(accent())),
        Span::styled(" help  ", Style::default().fg(text_dim())),
        Span::styled("q", Style::default().fg(accent())),
        Span::styled(" quit", Style::default().fg(text_dim())),
    ];

    f.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        area,
    );
}

fn draw_help_popup(f: &mut Frame) {
    let area = centered_rect(50, 50, f.area());
    f.render_widget(Clear, area);

    let key = |k: &'static str| Span::styled(format!("{:>8}  ", k), Style::default().fg(accent()));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(text()));

    let lines = vec![
        Line::from(vec![key("drag"), desc("Swipe across the grid")]),
        Line::from(vec![key("?  h"), desc("Toggle this help")]),
        Line::from(vec![key("Esc"), desc("Clear the last gesture")]),
        Line::from(vec![key("q"), desc("Quit")]),
        Line::from(""),
        Line::from(Span::styled(
            "Gestures are logged, tiles stay where they are",
            Style::default().fg(text_dim()),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default().fg(accent()).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
