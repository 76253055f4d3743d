//! Profiling API Client
//!
//! A client for the dataset-profiling HTTP API, allowing for dataset
//! discovery, uploads, and retrieval of derived profile views.

use crate::api::ProfileApi;
use crate::api::error::ApiError;
use crate::api::types::{
    CardinalityReport, ColumnsReport, CorrelationReport, DatasetCreated, DatasetEntry,
    DatasetList, DtypeReport, DuplicateReport, HeadReport, HistogramView, MissingReport,
    SummaryReport,
};
use crate::environment::Environment;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("datascope/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ProfileApiClient {
    client: Client,
    environment: Environment,
}

impl ProfileApiClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .multipart(form)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl ProfileApi for ProfileApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn list_datasets(&self) -> Result<Vec<DatasetEntry>, ApiError> {
        let response: DatasetList = self.get_request("api/datasets/").await?;
        Ok(response.datasets)
    }

    async fn create_dataset(
        &self,
        name: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<DatasetCreated, ApiError> {
        let form = Form::new().text("name", name.to_string()).part(
            "file",
            Part::bytes(contents)
                .file_name(file_name.to_string())
                .mime_str("application/octet-stream")?,
        );

        self.post_multipart("api/datasets/", form).await
    }

    async fn summary(&self, dataset_id: u64) -> Result<SummaryReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/summary/", dataset_id))
            .await
    }

    async fn missing(&self, dataset_id: u64) -> Result<MissingReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/missing/", dataset_id))
            .await
    }

    async fn dtypes(&self, dataset_id: u64) -> Result<DtypeReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/dtypes/", dataset_id))
            .await
    }

    async fn cardinality(&self, dataset_id: u64) -> Result<CardinalityReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/nunique/", dataset_id))
            .await
    }

    async fn columns(&self, dataset_id: u64) -> Result<ColumnsReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/columns/", dataset_id))
            .await
    }

    async fn correlations(&self, dataset_id: u64) -> Result<CorrelationReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/corr/", dataset_id))
            .await
    }

    async fn head(&self, dataset_id: u64, rows: usize) -> Result<HeadReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/head/?n={}", dataset_id, rows))
            .await
    }

    async fn duplicates(&self, dataset_id: u64) -> Result<DuplicateReport, ApiError> {
        self.get_request(&format!("api/datasets/{}/duplicates/", dataset_id))
            .await
    }

    async fn histogram(&self, dataset_id: u64, column: &str) -> Result<HistogramView, ApiError> {
        let column_param = urlencoding::encode(column).into_owned();
        self.get_request(&format!(
            "api/datasets/{}/histogram/?col={}",
            dataset_id, column_param
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_base_and_endpoint() {
        let client = ProfileApiClient::new(Environment::from_url("http://example.com/"));
        assert_eq!(
            client.build_url("/api/datasets/"),
            "http://example.com/api/datasets/"
        );
        assert_eq!(
            client.build_url("api/datasets/5/summary/"),
            "http://example.com/api/datasets/5/summary/"
        );
    }

    #[test]
    fn histogram_column_is_percent_encoded() {
        let encoded = urlencoding::encode("sepal width (cm)").into_owned();
        assert_eq!(encoded, "sepal%20width%20%28cm%29");
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live profiling API to run.
mod live_api_tests {
    use super::*;
    use crate::api::ProfileApi;

    #[tokio::test]
    #[ignore] // This test requires a live profiling API instance.
    /// Should list the datasets known to the local server.
    async fn test_list_datasets() {
        let client = ProfileApiClient::new(Environment::Local);
        match client.list_datasets().await {
            Ok(datasets) => println!("Got {} datasets", datasets.len()),
            Err(e) => panic!("Failed to list datasets: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live profiling API instance.
    /// Should fetch the summary for the most recent dataset.
    async fn test_summary_of_most_recent_dataset() {
        let client = ProfileApiClient::new(Environment::Local);
        let datasets = client.list_datasets().await.expect("list datasets");
        let Some(first) = datasets.first() else {
            println!("No datasets available to profile");
            return;
        };
        match client.summary(first.id).await {
            Ok(summary) => println!("{} rows x {} columns", summary.rows, summary.columns),
            Err(e) => panic!("Failed to fetch summary: {}", e),
        }
    }
}
