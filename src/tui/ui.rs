//! UI rendering and layout module

use crate::fetch::TermSource;
use crate::tui::app::{App, SearchStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Split the screen into input box, results pane and status bar
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn draw<S>(frame: &mut Frame, app: &App<S>)
where
    S: TermSource + Clone + Send + 'static,
{
    let [input_area, results_area, status_area] = layout(frame.area());

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.input()),
        Span::styled("█", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Rechercher / Search ")
            .border_style(Style::default().fg(Color::Rgb(0x29, 0x6F, 0x9A))),
    );
    frame.render_widget(input, input_area);

    let title = match &app.status {
        SearchStatus::Done { count } => format!(" Résultats / Results ({}) ", count),
        _ => " Résultats / Results ".to_string(),
    };
    let results = Paragraph::new(app.results())
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Rgb(0xA3, 0x2A, 0x34))),
        );
    frame.render_widget(results, results_area);

    let status = match &app.alert {
        Some(alert) => Paragraph::new(alert.as_str()).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        None => Paragraph::new(app.status_message()).style(Style::default().fg(Color::Gray)),
    };
    frame.render_widget(status, status_area);
}
