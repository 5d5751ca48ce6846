//! Dashboard header component
//!
//! Renders the title and next-refresh countdown gauge

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh countdown.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_text = format!(
        "VELO MARKET SENTIMENT ANALYSIS v{}",
        env!("CARGO_PKG_VERSION")
    );
    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Refreshing takes priority over the countdown
    let (progress_text, gauge_color, progress_percent) = if state.is_refreshing() {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "REFRESHING - Fetching sentiment".to_string(),
            Color::LightGreen,
            progress,
        )
    } else {
        let interval = state.poll_interval.as_secs().max(1);
        let remaining = state.seconds_until_refresh();
        let progress = ((interval - remaining.min(interval)) as f64 / interval as f64 * 100.0) as u16;
        (
            format!("WAITING - Next refresh in {}s", remaining),
            Color::LightBlue,
            progress.min(100),
        )
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
