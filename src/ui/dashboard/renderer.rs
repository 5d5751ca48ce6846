//! Dashboard main renderer

use super::components::{buckets, footer, header, indicators, logs, quadrant, status};
use super::state::{DashboardState, ViewState};
use crate::snapshot::display::SnapshotView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
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
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    render_body(f, main_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3]);
}

fn render_body(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.show_spinner() {
        status::render_loading(f, area, state.tick, &state.endpoint);
        return;
    }

    match state.view() {
        ViewState::Error { message } => status::render_error(f, area, message),
        ViewState::Ready {
            snapshot,
            last_updated,
        } => {
            let view = SnapshotView::of(snapshot);
            let body_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6),
                    Constraint::Length(4),
                    Constraint::Fill(1),
                ])
                .split(area);

            indicators::render_indicators(f, body_chunks[0], &view);
            quadrant::render_quadrant(f, body_chunks[1], view.quadrant, last_updated);
            buckets::render_buckets(f, body_chunks[2], &view.buckets);
        }
        ViewState::Loading => {}
    }
}
