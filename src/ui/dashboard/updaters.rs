//! Dashboard state update logic
//!
//! Maps view-model updates and worker events onto widget state. This is
//! the only place that knows which update feeds which widget.

use super::state::{ChartId, DashboardState, RefreshState, TableData};
use super::utils::numeric_bin_labels;
use crate::api::types::{ColumnDtype, HistogramView};
use crate::events::{DashboardUpdate, Event as WorkerEvent, EventType, Worker};

use std::time::Instant;

impl DashboardState {
    /// Advance one frame: apply queued updates and events.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(update) = self.pending_updates.pop_front() {
            self.apply_update(update);
        }

        while let Some(event) = self.pending_events.pop_front() {
            self.add_to_activity_log(event.clone());
            self.process_event(&event);
        }

        self.check_refresh_timeout();
    }

    /// Fall back to idle if a refresh never reported completion.
    fn check_refresh_timeout(&mut self) {
        if let RefreshState::Active { started_at } = self.refresh_state() {
            if started_at.elapsed().as_secs() > 60 {
                self.set_refresh_state(RefreshState::Idle);
            }
        }
    }

    fn apply_update(&mut self, update: DashboardUpdate) {
        match update {
            DashboardUpdate::Summary(summary) => {
                self.duplicate_count = Some(summary.duplicate_rows);
                self.summary = Some(summary);
            }
            DashboardUpdate::Missing(report) => {
                let bars = report
                    .missing_by_column
                    .into_iter()
                    .map(|c| (c.column, c.missing))
                    .collect();
                self.charts
                    .ensure_chart(ChartId::Missing, "MISSING BY COLUMN".to_string(), bars);
            }
            DashboardUpdate::Dtypes(report) => {
                self.charts.ensure_chart(
                    ChartId::Dtypes,
                    "INFERRED TYPES".to_string(),
                    dtype_distribution(&report.dtypes),
                );
            }
            DashboardUpdate::Cardinality(report) => {
                let bars = report
                    .nunique
                    .into_iter()
                    .map(|c| (c.column, c.unique))
                    .collect();
                self.charts
                    .ensure_chart(ChartId::Cardinality, "UNIQUE VALUES".to_string(), bars);
            }
            DashboardUpdate::Columns(columns) => {
                self.selected_column = if columns.is_empty() { None } else { Some(0) };
                self.columns = columns;
            }
            DashboardUpdate::Correlation(report) => {
                let bars = report
                    .pairs
                    .into_iter()
                    .map(|p| {
                        let strength = (p.corr.abs() * 100.0).round() as u64;
                        (format!("{} ~ {}", p.a, p.b), strength)
                    })
                    .collect();
                self.charts.ensure_chart(
                    ChartId::Correlation,
                    "TOP CORRELATIONS (|r| %)".to_string(),
                    bars,
                );
            }
            DashboardUpdate::Head(rows) => {
                self.preview = TableData::from_records(&rows);
            }
            DashboardUpdate::Duplicates(report) => {
                self.duplicates = TableData::from_records(&report.duplicates_sample);
                self.duplicate_count = Some(report.count);
            }
            DashboardUpdate::Histogram { column, view } => {
                // Keep the selector in sync when the fetch was triggered by
                // a refresh rather than a key press.
                if let Some(i) = self.columns.iter().position(|c| c == &column) {
                    self.selected_column = Some(i);
                }
                let (title, bars) = histogram_chart(&column, view);
                self.charts.ensure_chart(ChartId::Histogram, title, bars);
                self.histogram_column = Some(column);
            }
        }
    }

    /// Track refresh progress from refresher events.
    fn process_event(&mut self, event: &WorkerEvent) {
        if event.worker != Worker::Refresher {
            return;
        }
        match event.event_type {
            EventType::Refresh if event.msg.starts_with("Refreshing profile") => {
                self.set_refresh_state(RefreshState::Active {
                    started_at: Instant::now(),
                });
            }
            EventType::Success if event.msg.contains("Profile refreshed") => {
                self.set_refresh_state(RefreshState::Idle);
                self.set_last_refresh_timestamp(Some(event.timestamp.clone()));
            }
            EventType::Error if event.msg.contains("refresh finished") => {
                self.set_refresh_state(RefreshState::Idle);
            }
            _ => {}
        }
    }
}

/// Aggregates per-column dtypes into inferred-type counts, keeping
/// first-seen order.
fn dtype_distribution(dtypes: &[ColumnDtype]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for dtype in dtypes {
        let label = dtype.display_type();
        match counts.iter_mut().find(|(name, _)| name == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    counts
}

/// Chart title and bars for a histogram view. Numeric views get `[lo, hi)`
/// bin labels; categorical and datetime views use the server's labels.
fn histogram_chart(column: &str, view: HistogramView) -> (String, Vec<(String, u64)>) {
    match view {
        HistogramView::Numeric { edges, counts } => (
            format!("HISTOGRAM: {}", column),
            numeric_bin_labels(&edges).into_iter().zip(counts).collect(),
        ),
        HistogramView::Categorical { labels, counts }
        | HistogramView::Datetime { labels, counts } => (
            format!("FREQUENCIES: {}", column),
            labels.into_iter().zip(counts).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{
        ColumnMissing, CorrelationPair, CorrelationReport, DuplicateReport, MissingReport,
        SummaryReport,
    };
    use crate::environment::Environment;
    use crate::logging::LogLevel;

    fn state() -> DashboardState {
        DashboardState::new(5, Some("iris".to_string()), Environment::Local, Instant::now())
    }

    fn dtype(column: &str, dtype_name: &str, inferred: Option<&str>) -> ColumnDtype {
        ColumnDtype {
            column: column.to_string(),
            dtype: dtype_name.to_string(),
            inferred: inferred.map(str::to_string),
        }
    }

    #[test]
    fn dtype_distribution_counts_inferred_types() {
        let dtypes = vec![
            dtype("a", "float64", Some("floating")),
            dtype("b", "float64", Some("floating")),
            dtype("c", "object", Some("string")),
            dtype("d", "int64", None),
        ];
        assert_eq!(
            dtype_distribution(&dtypes),
            vec![
                ("floating".to_string(), 2),
                ("string".to_string(), 1),
                ("int64".to_string(), 1),
            ]
        );
    }

    #[test]
    /// A numeric histogram renders one `[lo, hi)` bar per bin.
    fn numeric_histogram_builds_bin_labels() {
        let view = HistogramView::Numeric {
            edges: vec![0.0, 0.5, 1.0],
            counts: vec![7, 3],
        };
        let (title, bars) = histogram_chart("petal_width", view);
        assert_eq!(title, "HISTOGRAM: petal_width");
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], ("[0.00, 0.50)".to_string(), 7));
        assert_eq!(bars[1], ("[0.50, 1.00)".to_string(), 3));
    }

    #[test]
    fn categorical_histogram_keeps_server_labels() {
        let view = HistogramView::Categorical {
            labels: vec!["setosa".to_string()],
            counts: vec![50],
        };
        let (title, bars) = histogram_chart("species", view);
        assert_eq!(title, "FREQUENCIES: species");
        assert_eq!(bars, vec![("setosa".to_string(), 50)]);
    }

    #[test]
    /// The duplicates view refines the duplicate count reported by the
    /// summary, matching the update order of a refresh.
    fn duplicates_update_refines_summary_count() {
        let mut state = state();
        state.add_update(DashboardUpdate::Summary(SummaryReport {
            rows: 10,
            columns: 2,
            memory_bytes: 128,
            duplicate_rows: 1,
            missing_total: 0,
            missing_pct: 0.0,
        }));
        state.add_update(DashboardUpdate::Duplicates(DuplicateReport {
            duplicates_sample: vec![],
            count: 4,
        }));
        state.update();
        assert_eq!(state.duplicate_count, Some(4));
    }

    #[test]
    fn columns_update_selects_the_first_column() {
        let mut state = state();
        state.add_update(DashboardUpdate::Columns(vec![
            "a".to_string(),
            "b".to_string(),
        ]));
        state.update();
        assert_eq!(state.selected_column_name(), Some("a"));

        state.add_update(DashboardUpdate::Columns(vec![]));
        state.update();
        assert_eq!(state.selected_column_name(), None);
    }

    #[test]
    fn correlation_bars_use_absolute_percentages() {
        let mut state = state();
        state.add_update(DashboardUpdate::Correlation(CorrelationReport {
            pairs: vec![CorrelationPair {
                a: "x".to_string(),
                b: "y".to_string(),
                corr: -0.96,
            }],
        }));
        state.update();
        let chart = state.charts.get(ChartId::Correlation).unwrap();
        assert_eq!(chart.bars, vec![("x ~ y".to_string(), 96)]);
    }

    #[test]
    fn repeated_missing_updates_reuse_the_chart_slot() {
        let mut state = state();
        for missing in [3, 9] {
            state.add_update(DashboardUpdate::Missing(MissingReport {
                missing_by_column: vec![ColumnMissing {
                    column: "a".to_string(),
                    missing,
                    missing_pct: 0.0,
                }],
            }));
            state.update();
        }
        let chart = state.charts.get(ChartId::Missing).unwrap();
        assert_eq!(chart.revision, 2);
        assert_eq!(chart.bars, vec![("a".to_string(), 9)]);
        assert_eq!(state.charts.len(), 1);
    }

    #[test]
    fn refresh_events_toggle_refresh_state() {
        let mut state = state();
        state.add_event(WorkerEvent::refresher_with_level(
            "Refreshing profile for dataset 5...".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ));
        state.update();
        assert!(matches!(
            state.refresh_state(),
            RefreshState::Active { .. }
        ));

        state.add_event(WorkerEvent::refresher_with_level(
            "Profile refreshed".to_string(),
            EventType::Success,
            LogLevel::Info,
        ));
        state.update();
        assert!(matches!(state.refresh_state(), RefreshState::Idle));
        assert!(state.last_refresh_timestamp().is_some());
    }
}
