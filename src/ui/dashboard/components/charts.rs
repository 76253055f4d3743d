//! Dashboard chart components
//!
//! Renders the profile bar charts from the chart registry

use super::super::state::{ChartId, DashboardState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{BarChart, Block, BorderType, Borders, Paragraph};

/// Render the 2x2 grid of profile charts.
pub fn render_charts_grid(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_chart(f, top[0], state, ChartId::Missing, Color::Yellow, None);
    render_chart(f, top[1], state, ChartId::Dtypes, Color::Magenta, None);
    render_chart(f, bottom[0], state, ChartId::Cardinality, Color::LightBlue, None);
    // Correlation strengths are percentages, so pin the scale.
    render_chart(f, bottom[1], state, ChartId::Correlation, Color::Green, Some(100));
}

/// Render the histogram for the selected column.
pub fn render_histogram(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chart = state.charts.get(ChartId::Histogram);
    let mut title = chart
        .map(|c| c.title.clone())
        .unwrap_or_else(|| placeholder_title(ChartId::Histogram).to_string());
    // Flag a selection whose histogram is still in flight; the previous
    // chart keeps showing until the new view arrives.
    if let Some(selected) = state.selected_column_name() {
        if state.histogram_column.as_deref() != Some(selected) {
            title = format!("HISTOGRAM: {} (loading)", selected);
        }
    }
    let bars: &[(String, u64)] = chart.map(|c| c.bars.as_slice()).unwrap_or(&[]);
    render_bars(f, area, title, bars, Color::Cyan, None);
}

fn render_chart(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    state: &DashboardState,
    id: ChartId,
    color: Color,
    max: Option<u64>,
) {
    let chart = state.charts.get(id);
    let title = chart
        .map(|c| c.title.clone())
        .unwrap_or_else(|| placeholder_title(id).to_string());
    let bars: &[(String, u64)] = chart.map(|c| c.bars.as_slice()).unwrap_or(&[]);
    render_bars(f, area, title, bars, color, max);
}

fn render_bars(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    title: String,
    bars: &[(String, u64)],
    color: Color,
    max: Option<u64>,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if bars.is_empty() {
        let placeholder = Paragraph::new("No data.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let data: Vec<(&str, u64)> = bars.iter().map(|(label, value)| (label.as_str(), *value)).collect();
    let mut chart = BarChart::default()
        .block(block)
        .data(&data)
        .bar_width(bar_width(area.width, data.len()))
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(Color::Gray));
    if let Some(max) = max {
        chart = chart.max(max);
    }
    f.render_widget(chart, area);
}

fn placeholder_title(id: ChartId) -> &'static str {
    match id {
        ChartId::Missing => "MISSING BY COLUMN",
        ChartId::Dtypes => "INFERRED TYPES",
        ChartId::Cardinality => "UNIQUE VALUES",
        ChartId::Correlation => "TOP CORRELATIONS (|r| %)",
        ChartId::Histogram => "HISTOGRAM",
    }
}

/// Spread the bars across the available width, within sane bounds.
fn bar_width(area_width: u16, bar_count: usize) -> u16 {
    let inner = area_width.saturating_sub(2) as usize;
    let count = bar_count.max(1);
    ((inner.saturating_sub(count)) / count).clamp(3, 14) as u16
}
