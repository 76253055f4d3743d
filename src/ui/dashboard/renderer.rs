//! Dashboard main renderer

use super::components::{charts, footer, header, kpis, logs, tables};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Percentage(32),
            Constraint::Percentage(28),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    kpis::render_kpis(f, main_chunks[1], state);
    charts::render_charts_grid(f, main_chunks[2], state);

    let detail_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[3]);

    charts::render_histogram(f, detail_chunks[0], state);
    tables::render_tables(f, detail_chunks[1], state);

    logs::render_logs_panel(f, main_chunks[4], state);
    footer::render_footer(f, main_chunks[5], state);
}
