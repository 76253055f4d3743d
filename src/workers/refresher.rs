//! Profile refreshing with per-view failure isolation

use crate::api::ProfileApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::HEAD_PREVIEW_ROWS;
use crate::events::{DashboardUpdate, EventType};
use crate::logging::{LogLevel, classify_fetch_error};
use crate::workers::core::EventSender;
use tokio::sync::{broadcast, mpsc};

/// Commands the UI sends to the refresher.
#[derive(Debug, Clone)]
pub enum RefresherCommand {
    /// Re-fetch every profile view for the active dataset.
    RefreshAll,
    /// Fetch a histogram for the given column.
    Histogram { column: String },
}

/// Background worker that owns the API handle and feeds the dashboard.
pub struct Refresher {
    dataset_id: u64,
    api: Box<dyn ProfileApi>,
    updates: mpsc::Sender<DashboardUpdate>,
    events: EventSender,
}

impl Refresher {
    pub fn new(
        dataset_id: u64,
        api: Box<dyn ProfileApi>,
        updates: mpsc::Sender<DashboardUpdate>,
        events: EventSender,
    ) -> Self {
        Self {
            dataset_id,
            api,
            updates,
            events,
        }
    }

    /// Serve refresh commands until the command channel closes or shutdown
    /// fires. A full refresh runs before the first command is read.
    pub async fn run(
        self,
        mut commands: mpsc::Receiver<RefresherCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        self.refresh_all().await;
        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                command = commands.recv() => match command {
                    Some(RefresherCommand::RefreshAll) => self.refresh_all().await,
                    Some(RefresherCommand::Histogram { column }) => {
                        self.fetch_histogram(&column).await
                    }
                    None => break,
                },
            }
        }
    }

    /// Fetch every profile view once.
    ///
    /// The seven independent views are fetched concurrently. The column
    /// list is fetched afterwards since the initial histogram depends on
    /// it. A failed view is logged and skipped; the rest still render.
    pub(crate) async fn refresh_all(&self) {
        self.events
            .send_refresher_event(
                format!("Refreshing profile for dataset {}...", self.dataset_id),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        let id = self.dataset_id;
        let (summary, missing, dtypes, cardinality, correlation, head, duplicates) = tokio::join!(
            self.api.summary(id),
            self.api.missing(id),
            self.api.dtypes(id),
            self.api.cardinality(id),
            self.api.correlations(id),
            self.api.head(id, HEAD_PREVIEW_ROWS),
            self.api.duplicates(id),
        );

        let mut failures = 0;
        failures += self
            .publish("summary", summary.map(DashboardUpdate::Summary))
            .await;
        failures += self
            .publish("missing values", missing.map(DashboardUpdate::Missing))
            .await;
        failures += self
            .publish("dtypes", dtypes.map(DashboardUpdate::Dtypes))
            .await;
        failures += self
            .publish(
                "cardinality",
                cardinality.map(DashboardUpdate::Cardinality),
            )
            .await;
        failures += self
            .publish(
                "correlations",
                correlation.map(DashboardUpdate::Correlation),
            )
            .await;
        failures += self
            .publish("head preview", head.map(|r| DashboardUpdate::Head(r.head)))
            .await;
        failures += self
            .publish("duplicates", duplicates.map(DashboardUpdate::Duplicates))
            .await;

        match self.api.columns(id).await {
            Ok(report) => {
                let first_column = report.columns.first().cloned();
                let _ = self
                    .updates
                    .send(DashboardUpdate::Columns(report.columns))
                    .await;
                if let Some(column) = first_column {
                    self.fetch_histogram(&column).await;
                }
            }
            Err(e) => {
                failures += 1;
                self.events
                    .send_refresher_event(
                        format!("Failed to fetch columns: {}", e),
                        EventType::Error,
                        classify_fetch_error(&e),
                    )
                    .await;
            }
        }

        if failures == 0 {
            self.events
                .send_refresher_event(
                    "Profile refreshed".to_string(),
                    EventType::Success,
                    LogLevel::Info,
                )
                .await;
        } else {
            self.events
                .send_refresher_event(
                    format!("Profile refresh finished with {} failed views", failures),
                    EventType::Error,
                    LogLevel::Warn,
                )
                .await;
        }
    }

    pub(crate) async fn fetch_histogram(&self, column: &str) {
        match self.api.histogram(self.dataset_id, column).await {
            Ok(view) => {
                let _ = self
                    .updates
                    .send(DashboardUpdate::Histogram {
                        column: column.to_string(),
                        view,
                    })
                    .await;
                self.events
                    .send_histogram_event(
                        format!("Fetched histogram for {}", column),
                        EventType::Refresh,
                        LogLevel::Debug,
                    )
                    .await;
            }
            Err(e) => {
                self.events
                    .send_histogram_event(
                        format!("Failed to fetch histogram for {}: {}", column, e),
                        EventType::Error,
                        classify_fetch_error(&e),
                    )
                    .await;
            }
        }
    }

    async fn publish(&self, view: &str, result: Result<DashboardUpdate, ApiError>) -> usize {
        match result {
            Ok(update) => {
                let _ = self.updates.send(update).await;
                0
            }
            Err(e) => {
                self.events
                    .send_refresher_event(
                        format!("Failed to fetch {}: {}", view, e),
                        EventType::Error,
                        classify_fetch_error(&e),
                    )
                    .await;
                1
            }
        }
    }
}
