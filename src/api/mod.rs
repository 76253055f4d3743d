use crate::api::error::ApiError;
use crate::api::types::{
    CardinalityReport, ColumnsReport, CorrelationReport, DatasetCreated, DatasetEntry,
    DtypeReport, DuplicateReport, HeadReport, HistogramView, MissingReport, SummaryReport,
};
use crate::environment::Environment;

pub(crate) mod client;
pub use client::ProfileApiClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ProfileApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// List the datasets known to the server, most recent first.
    async fn list_datasets(&self) -> Result<Vec<DatasetEntry>, ApiError>;

    /// Upload a file and create a new dataset from it.
    async fn create_dataset(
        &self,
        name: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<DatasetCreated, ApiError>;

    /// Overview KPIs for a dataset.
    async fn summary(&self, dataset_id: u64) -> Result<SummaryReport, ApiError>;

    /// Per-column missing-value counts.
    async fn missing(&self, dataset_id: u64) -> Result<MissingReport, ApiError>;

    /// Per-column declared and inferred dtypes.
    async fn dtypes(&self, dataset_id: u64) -> Result<DtypeReport, ApiError>;

    /// Per-column unique-value counts.
    async fn cardinality(&self, dataset_id: u64) -> Result<CardinalityReport, ApiError>;

    /// Column names, in dataset order.
    async fn columns(&self, dataset_id: u64) -> Result<ColumnsReport, ApiError>;

    /// Strongest correlation pairs among numeric columns.
    async fn correlations(&self, dataset_id: u64) -> Result<CorrelationReport, ApiError>;

    /// The first `rows` rows of the dataset.
    async fn head(&self, dataset_id: u64, rows: usize) -> Result<HeadReport, ApiError>;

    /// A sample of duplicated rows plus the total duplicate count.
    async fn duplicates(&self, dataset_id: u64) -> Result<DuplicateReport, ApiError>;

    /// Histogram for one column; the payload kind depends on the column type.
    async fn histogram(&self, dataset_id: u64, column: &str) -> Result<HistogramView, ApiError>;
}
