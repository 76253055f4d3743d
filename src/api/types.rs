//! Response payloads returned by the profiling API.
//!
//! Field names mirror the server's JSON exactly; everything here is a
//! read-only view-model that is re-fetched on refresh.

use serde::Deserialize;

/// A row object as returned by the preview and duplicate endpoints.
///
/// Key order is the server's column order (`serde_json/preserve_order`),
/// so tables render columns verbatim.
pub type RowRecord = serde_json::Map<String, serde_json::Value>;

/// One entry of the dataset listing, most recent first.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetEntry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetList {
    pub datasets: Vec<DatasetEntry>,
}

/// Response to a successful dataset upload.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetCreated {
    pub id: u64,
    pub name: String,
}

/// Overview KPIs for the active dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryReport {
    pub rows: u64,
    pub columns: u64,
    pub memory_bytes: u64,
    pub duplicate_rows: u64,
    pub missing_total: u64,
    pub missing_pct: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: u64,
    #[serde(default)]
    pub missing_pct: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissingReport {
    pub missing_by_column: Vec<ColumnMissing>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDtype {
    pub column: String,
    pub dtype: String,
    #[serde(default)]
    pub inferred: Option<String>,
}

impl ColumnDtype {
    /// The label used for the type-distribution chart: the inferred type
    /// when the server provides one, the declared dtype otherwise.
    pub fn display_type(&self) -> &str {
        match self.inferred.as_deref() {
            Some(inferred) if !inferred.is_empty() => inferred,
            _ => &self.dtype,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DtypeReport {
    pub dtypes: Vec<ColumnDtype>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnCardinality {
    pub column: String,
    pub unique: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardinalityReport {
    pub nunique: Vec<ColumnCardinality>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnsReport {
    pub columns: Vec<String>,
}

/// A correlated column pair; `corr` is in [-1, 1].
#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationPair {
    pub a: String,
    pub b: String,
    pub corr: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationReport {
    pub pairs: Vec<CorrelationPair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadReport {
    pub head: Vec<RowRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuplicateReport {
    pub duplicates_sample: Vec<RowRecord>,
    pub count: u64,
}

/// Histogram payload, discriminated by the server-side `type` field.
///
/// Numeric histograms carry bin edges and counts, with
/// `edges.len() == counts.len() + 1`; categorical and datetime histograms
/// carry equal-length label and count vectors.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum HistogramView {
    #[serde(rename = "numeric")]
    Numeric { edges: Vec<f64>, counts: Vec<u64> },
    #[serde(rename = "categorical")]
    Categorical { labels: Vec<String>, counts: Vec<u64> },
    #[serde(rename = "datetime")]
    Datetime { labels: Vec<String>, counts: Vec<u64> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_summary_report() {
        let json = r#"{
            "rows": 150,
            "columns": 5,
            "memory_bytes": 10280,
            "duplicate_rows": 3,
            "missing_total": 12,
            "missing_pct": 1.6
        }"#;
        let report: SummaryReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.rows, 150);
        assert_eq!(report.columns, 5);
        assert_eq!(report.duplicate_rows, 3);
        assert!((report.missing_pct - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_numeric_histogram() {
        let json = r#"{"type": "numeric", "edges": [0.0, 1.0, 2.0], "counts": [4, 6]}"#;
        let view: HistogramView = serde_json::from_str(json).unwrap();
        match view {
            HistogramView::Numeric { edges, counts } => {
                assert_eq!(edges.len(), counts.len() + 1);
            }
            other => panic!("expected numeric histogram, got {:?}", other),
        }
    }

    #[test]
    fn deserializes_categorical_and_datetime_histograms() {
        let json = r#"{"type": "categorical", "labels": ["a", "b"], "counts": [9, 1]}"#;
        assert!(matches!(
            serde_json::from_str::<HistogramView>(json).unwrap(),
            HistogramView::Categorical { .. }
        ));

        let json = r#"{"type": "datetime", "labels": ["2024-01"], "counts": [31]}"#;
        assert!(matches!(
            serde_json::from_str::<HistogramView>(json).unwrap(),
            HistogramView::Datetime { .. }
        ));
    }

    #[test]
    fn dataset_list_tolerates_missing_upload_timestamp() {
        let json = r#"{"datasets": [{"id": 5, "name": "iris"}]}"#;
        let list: DatasetList = serde_json::from_str(json).unwrap();
        assert_eq!(list.datasets[0].id, 5);
        assert!(list.datasets[0].uploaded_at.is_none());
    }

    #[test]
    fn row_records_keep_server_column_order() {
        let json = r#"{"head": [{"z": 1, "a": 2, "m": 3}]}"#;
        let report: HeadReport = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = report.head[0].keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn display_type_falls_back_to_declared_dtype() {
        let with_inferred: ColumnDtype =
            serde_json::from_str(r#"{"column": "x", "dtype": "object", "inferred": "string"}"#)
                .unwrap();
        assert_eq!(with_inferred.display_type(), "string");

        let without: ColumnDtype =
            serde_json::from_str(r#"{"column": "x", "dtype": "float64"}"#).unwrap();
        assert_eq!(without.display_type(), "float64");
    }
}
