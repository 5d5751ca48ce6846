//! Directional bias and trading condition panels

use super::super::utils::tone_color;
use crate::snapshot::display::{SnapshotView, Tone};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_indicators(f: &mut Frame, area: Rect, view: &SnapshotView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_indicator(
        f,
        chunks[0],
        "DIRECTIONAL BIAS",
        view.direction.label(),
        view.direction.tone(),
        &view.directional_bias_text,
    );
    render_indicator(
        f,
        chunks[1],
        "TRADING CONDITION",
        view.condition.label(),
        view.condition.tone(),
        &view.strategic_bias_text,
    );
}

fn render_indicator(f: &mut Frame, area: Rect, title: &str, label: &str, tone: Tone, detail: &str) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default()
                .fg(tone_color(tone))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            detail.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}
