//! Dashboard state management
//!
//! Owns everything the renderer reads: KPI data, chart slots, tables, and
//! the activity log. Constructed once at startup and threaded through the
//! UI loop; workers reach it only through channels.

use crate::api::types::{RowRecord, SummaryReport};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{DashboardUpdate, Event as WorkerEvent};

use std::collections::VecDeque;
use std::collections::hash_map::{Entry, HashMap};
use std::time::Instant;

/// State for tracking an in-flight refresh
#[derive(Debug, Clone)]
pub enum RefreshState {
    Idle,
    Active { started_at: Instant },
}

/// Identifies one chart widget on the dashboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChartId {
    Missing,
    Dtypes,
    Cardinality,
    Correlation,
    Histogram,
}

/// The data behind one chart widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub bars: Vec<(String, u64)>,
    /// Bumped on every in-place update; a slot is created at revision 1 and
    /// never recreated afterwards.
    pub revision: u64,
}

/// Chart slots, at most one per widget id, updated in place across
/// refreshes rather than destroyed and recreated.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<ChartId, ChartData>,
}

impl ChartRegistry {
    pub fn ensure_chart(
        &mut self,
        id: ChartId,
        title: String,
        bars: Vec<(String, u64)>,
    ) -> &ChartData {
        match self.charts.entry(id) {
            Entry::Occupied(slot) => {
                let chart = slot.into_mut();
                chart.title = title;
                chart.bars = bars;
                chart.revision += 1;
                chart
            }
            Entry::Vacant(slot) => slot.insert(ChartData {
                title,
                bars,
                revision: 1,
            }),
        }
    }

    pub fn get(&self, id: ChartId) -> Option<&ChartData> {
        self.charts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

/// Rows and columns ready for the table widget, cells already stringified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Builds table data from row objects, taking the column order from the
    /// first row's keys.
    pub fn from_records(records: &[RowRecord]) -> Self {
        let Some(first) = records.first() else {
            return Self::default();
        };
        let columns: Vec<String> = first.keys().cloned().collect();
        let rows = records
            .iter()
            .map(|record| columns.iter().map(|c| cell_text(record.get(c))).collect())
            .collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(value: Option<&serde_json::Value>) -> String {
    use serde_json::Value;
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Dashboard state with the fetched profile views and activity log.
#[derive(Debug)]
pub struct DashboardState {
    /// Identifier of the dataset being profiled.
    pub dataset_id: u64,
    /// Display name of the dataset, when the listing provided one.
    pub dataset_name: Option<String>,
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Overview KPIs from the latest summary fetch.
    pub summary: Option<SummaryReport>,
    /// Duplicate-row count; the duplicates view refines the summary figure.
    pub duplicate_count: Option<u64>,
    /// Column names of the dataset, in dataset order.
    pub columns: Vec<String>,
    /// Index into `columns` of the histogram selection.
    pub selected_column: Option<usize>,
    /// Column shown by the histogram chart (trails the selection until the
    /// fetched view arrives).
    pub histogram_column: Option<String>,
    /// Chart slots keyed by widget.
    pub charts: ChartRegistry,
    /// Head preview rows.
    pub preview: TableData,
    /// Duplicate sample rows.
    pub duplicates: TableData,
    /// Queue of updates waiting to be applied
    pub pending_updates: VecDeque<DashboardUpdate>,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,

    /// Current refresh state (active or idle)
    refresh_state: RefreshState,
    /// Timestamp of the last completed refresh
    last_refresh_timestamp: Option<String>,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(
        dataset_id: u64,
        dataset_name: Option<String>,
        environment: Environment,
        start_time: Instant,
    ) -> Self {
        Self {
            dataset_id,
            dataset_name,
            environment,
            start_time,
            summary: None,
            duplicate_count: None,
            columns: Vec::new(),
            selected_column: None,
            histogram_column: None,
            charts: ChartRegistry::default(),
            preview: TableData::default(),
            duplicates: TableData::default(),
            pending_updates: VecDeque::new(),
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
            refresh_state: RefreshState::Idle,
            last_refresh_timestamp: None,
        }
    }

    // Getter methods for private fields
    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh_state
    }

    pub fn last_refresh_timestamp(&self) -> &Option<String> {
        &self.last_refresh_timestamp
    }

    // Setter methods for private fields (for updaters)
    pub fn set_refresh_state(&mut self, state: RefreshState) {
        self.refresh_state = state;
    }

    pub fn set_last_refresh_timestamp(&mut self, timestamp: Option<String>) {
        self.last_refresh_timestamp = timestamp;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Add a view-model update to the processing queue
    pub fn add_update(&mut self, update: DashboardUpdate) {
        self.pending_updates.push_back(update);
    }

    /// Name of the column the histogram selector points at.
    pub fn selected_column_name(&self) -> Option<&str> {
        self.selected_column
            .and_then(|i| self.columns.get(i))
            .map(String::as_str)
    }

    /// Move the histogram selection one column right; returns the newly
    /// selected column when the selection moved.
    pub fn select_next_column(&mut self) -> Option<String> {
        let current = self.selected_column?;
        if current + 1 >= self.columns.len() {
            return None;
        }
        self.selected_column = Some(current + 1);
        self.columns.get(current + 1).cloned()
    }

    /// Move the histogram selection one column left; returns the newly
    /// selected column when the selection moved.
    pub fn select_prev_column(&mut self) -> Option<String> {
        let current = self.selected_column?;
        let next = current.checked_sub(1)?;
        self.selected_column = Some(next);
        self.columns.get(next).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RowRecord {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    /// Filling the same chart slot twice must reuse the slot, not recreate
    /// it, and the slot must reflect the second call's data.
    fn ensure_chart_updates_in_place() {
        let mut registry = ChartRegistry::default();

        registry.ensure_chart(
            ChartId::Missing,
            "Missing by column".to_string(),
            vec![("a".to_string(), 1)],
        );
        let chart = registry.ensure_chart(
            ChartId::Missing,
            "Missing by column".to_string(),
            vec![("a".to_string(), 9), ("b".to_string(), 2)],
        );

        assert_eq!(chart.revision, 2);
        assert_eq!(chart.bars, vec![("a".to_string(), 9), ("b".to_string(), 2)]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn charts_use_distinct_slots_per_widget() {
        let mut registry = ChartRegistry::default();
        registry.ensure_chart(ChartId::Missing, "m".to_string(), vec![]);
        registry.ensure_chart(ChartId::Histogram, "h".to_string(), vec![]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(ChartId::Missing).unwrap().revision, 1);
    }

    #[test]
    /// No rows means no header and no body rows; the renderer shows a
    /// placeholder instead.
    fn empty_records_build_an_empty_table() {
        let table = TableData::from_records(&[]);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn records_build_header_and_stringified_rows() {
        let records = vec![
            record(json!({"a": 1, "b": 2})),
            record(json!({"a": 3, "b": 4})),
        ];
        let table = TableData::from_records(&records);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string(), "4".to_string()],
            ]
        );
    }

    #[test]
    fn null_and_missing_cells_render_empty() {
        let records = vec![
            record(json!({"a": null, "b": true})),
            record(json!({"a": "x", "b": 1.5})),
        ];
        let table = TableData::from_records(&records);
        assert_eq!(table.rows[0], vec!["".to_string(), "true".to_string()]);
        assert_eq!(table.rows[1], vec!["x".to_string(), "1.5".to_string()]);
    }

    #[test]
    fn column_selection_moves_without_wrapping() {
        let mut state = DashboardState::new(1, None, Environment::Local, Instant::now());
        state.columns = vec!["a".to_string(), "b".to_string()];
        state.selected_column = Some(0);

        assert_eq!(state.select_prev_column(), None);
        assert_eq!(state.select_next_column(), Some("b".to_string()));
        assert_eq!(state.select_next_column(), None);
        assert_eq!(state.selected_column_name(), Some("b"));
    }
}
