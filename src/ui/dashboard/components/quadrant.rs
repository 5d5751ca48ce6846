//! Current market quadrant panel

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_quadrant(f: &mut Frame, area: Rect, quadrant: &str, last_updated: &DateTime<Local>) {
    let lines = vec![
        Line::from(Span::styled(
            quadrant.to_string(),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Last updated: {}", last_updated.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title("CURRENT MARKET QUADRANT")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
