//! Dashboard KPI tiles
//!
//! Renders the overview metrics from the summary view

use super::super::state::DashboardState;
use super::super::utils::{fmt_bytes, fmt_count};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the row of KPI tiles.
pub fn render_kpis(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let summary = state.summary.as_ref();
    let rows = summary.map(|s| fmt_count(s.rows));
    let columns = summary.map(|s| fmt_count(s.columns));
    let memory = summary.map(|s| fmt_bytes(s.memory_bytes));
    let duplicates = state.duplicate_count.map(fmt_count);
    let missing = summary.map(|s| format!("{} ({:.2}%)", fmt_count(s.missing_total), s.missing_pct));

    render_tile(f, tiles[0], "ROWS", rows, Color::White);
    render_tile(f, tiles[1], "COLUMNS", columns, Color::White);
    render_tile(f, tiles[2], "MEMORY", memory, Color::LightCyan);
    render_tile(f, tiles[3], "DUPLICATES", duplicates, Color::LightYellow);
    render_tile(f, tiles[4], "MISSING", missing, Color::LightRed);
}

fn render_tile(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    label: &str,
    value: Option<String>,
    color: Color,
) {
    let (text, style) = match value {
        Some(value) => (value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let tile = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(tile, area);
}
