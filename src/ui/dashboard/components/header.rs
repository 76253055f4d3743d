//! Dashboard header component
//!
//! Renders the title and refresh progress gauge

use super::super::state::{DashboardState, RefreshState};
use super::super::utils::format_compact_timestamp;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render the header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    // Title section with the active dataset and environment
    let version = env!("CARGO_PKG_VERSION");
    let title_text = match &state.dataset_name {
        Some(name) => format!(
            "DATASCOPE v{} [{}] - {} (dataset {})",
            version, state.environment, name, state.dataset_id
        ),
        None => format!(
            "DATASCOPE v{} [{}] - dataset {}",
            version, state.environment, state.dataset_id
        ),
    };

    let title = Paragraph::new(title_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    // Gauge logic: an active refresh animates, otherwise show when the
    // profile was last refreshed.
    let (progress_text, gauge_color, progress_percent) = match state.refresh_state() {
        RefreshState::Active { .. } => {
            // Animated gauge - loops every 20 ticks for smooth animation
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            (
                "REFRESHING - Fetching profile views".to_string(),
                Color::LightGreen,
                progress,
            )
        }
        RefreshState::Idle => {
            let display_text = match state.last_refresh_timestamp() {
                Some(timestamp) => {
                    format!("READY - Last refresh {}", format_compact_timestamp(timestamp))
                }
                None => "READY - Waiting for first refresh".to_string(),
            };
            (display_text, Color::LightBlue, 100)
        }
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
