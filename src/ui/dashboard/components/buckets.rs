//! Return bucket bar chart
//!
//! One bar per bucket in the snapshot's own order, colored by the bucket's
//! positivity flag rather than by the headline direction.

use super::super::utils::{tone_background, tone_color};
use crate::snapshot::display::BucketView;
use ratatui::Frame;
use ratatui::layout::{Direction, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Padding};

/// Width of each bar, capped so eight buckets fit a normal terminal.
fn bar_width(area: Rect, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let inner = area.width.saturating_sub(4) as usize;
    ((inner / count).saturating_sub(1)).clamp(1, 9) as u16
}

pub fn render_buckets(f: &mut Frame, area: Rect, buckets: &[BucketView]) {
    let bars: Vec<Bar> = buckets
        .iter()
        .map(|bucket| {
            Bar::default()
                .label(Line::from(bucket.label.to_string()))
                .value(bucket.value.max(0.0).round() as u64)
                .text_value(format!("{}", bucket.value))
                .style(Style::default().fg(tone_background(bucket.tone)))
                .value_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(tone_color(bucket.tone)),
                )
        })
        .collect();

    let block = Block::default()
        .title("1D RETURN BUCKETS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Vertical)
        .bar_width(bar_width(area, bars.len()))
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}
