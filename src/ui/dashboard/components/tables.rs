//! Dashboard table components
//!
//! Renders the head preview and duplicate sample tables

use super::super::state::{DashboardState, TableData};
use super::super::utils::fmt_count;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table};

/// Render the preview and duplicates tables, stacked vertically.
pub fn render_tables(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_table(f, chunks[0], "HEAD PREVIEW".to_string(), &state.preview);

    let duplicates_title = match state.duplicate_count {
        Some(count) => format!("DUPLICATE ROWS ({})", fmt_count(count)),
        None => "DUPLICATE ROWS".to_string(),
    };
    render_table(f, chunks[1], duplicates_title, &state.duplicates);
}

fn render_table(f: &mut Frame, area: ratatui::layout::Rect, title: String, data: &TableData) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if data.is_empty() {
        let placeholder = Paragraph::new("No data.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(data.columns.iter().cloned()).style(
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    );
    let rows = data
        .rows
        .iter()
        .map(|cells| Row::new(cells.iter().cloned()).style(Style::default().fg(Color::White)));
    let widths = vec![Constraint::Fill(1); data.columns.len()];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}
