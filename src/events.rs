//! Event System
//!
//! Types for worker events shown in the activity log, plus the typed
//! view-model updates the refresher publishes to the dashboard.

use crate::api::types::{
    CardinalityReport, CorrelationReport, DtypeReport, DuplicateReport, HistogramView,
    MissingReport, RowRecord, SummaryReport,
};
use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Worker that fetches profile views from the API and publishes them.
    Refresher,
    /// Histogram fetches triggered by column selection.
    Histogram,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn refresher_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Refresher, msg, event_type, log_level)
    }

    pub fn histogram_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Histogram, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// One widget's worth of freshly fetched profile data.
///
/// The refresher knows nothing about presentation; it publishes these and
/// the dashboard state maps each to the widget it feeds.
#[derive(Debug, Clone)]
pub enum DashboardUpdate {
    Summary(SummaryReport),
    Missing(MissingReport),
    Dtypes(DtypeReport),
    Cardinality(CardinalityReport),
    Columns(Vec<String>),
    Correlation(CorrelationReport),
    Head(Vec<RowRecord>),
    Duplicates(DuplicateReport),
    Histogram {
        column: String,
        view: HistogramView,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_events_are_always_displayed() {
        let event = Event::refresher_with_level(
            "Profile refreshed".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(event.should_display());
    }

    #[test]
    fn display_includes_type_and_message() {
        let event = Event::histogram_with_level(
            "Fetched histogram for petal_width".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        );
        let rendered = format!("{}", event);
        assert!(rendered.starts_with("Refresh ["));
        assert!(rendered.ends_with("Fetched histogram for petal_width"));
    }
}
