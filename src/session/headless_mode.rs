//! Headless mode execution
//!
//! Prints a one-shot profile report to stdout without entering the TUI.

use crate::api::ProfileApi;
use crate::api::types::{DatasetEntry, HistogramView};
use crate::consts::cli_consts::HEAD_PREVIEW_ROWS;
use crate::ui::dashboard::state::TableData;
use crate::ui::dashboard::utils::{fmt_bytes, fmt_count, numeric_bin_labels};
use std::error::Error;

/// Fetches every profile view once and prints a textual report.
///
/// A failed view prints a warning line and the report continues, matching
/// the dashboard's per-view isolation.
pub async fn run_headless_mode(
    api: Box<dyn ProfileApi>,
    dataset: &DatasetEntry,
) -> Result<(), Box<dyn Error>> {
    if dataset.name.is_empty() {
        println!("Dataset {}", dataset.id);
    } else {
        println!("Dataset {} - {}", dataset.id, dataset.name);
    }
    if let Some(uploaded_at) = &dataset.uploaded_at {
        println!("Uploaded {}", uploaded_at);
    }
    println!();

    match api.summary(dataset.id).await {
        Ok(summary) => {
            println!("Rows:       {}", fmt_count(summary.rows));
            println!("Columns:    {}", fmt_count(summary.columns));
            println!("Memory:     {}", fmt_bytes(summary.memory_bytes));
            println!("Duplicates: {}", fmt_count(summary.duplicate_rows));
            println!(
                "Missing:    {} ({:.2}%)",
                fmt_count(summary.missing_total),
                summary.missing_pct
            );
        }
        Err(e) => println!("summary unavailable: {}", e),
    }

    println!("\n== Missing by column ==");
    match api.missing(dataset.id).await {
        Ok(report) => {
            for column in &report.missing_by_column {
                println!(
                    "{:<24} {:>8} ({:.2}%)",
                    column.column, column.missing, column.missing_pct
                );
            }
        }
        Err(e) => println!("missing values unavailable: {}", e),
    }

    println!("\n== Dtypes ==");
    match api.dtypes(dataset.id).await {
        Ok(report) => {
            for dtype in &report.dtypes {
                println!(
                    "{:<24} {:<12} {}",
                    dtype.column,
                    dtype.dtype,
                    dtype.inferred.as_deref().unwrap_or("-")
                );
            }
        }
        Err(e) => println!("dtypes unavailable: {}", e),
    }

    println!("\n== Unique values ==");
    match api.cardinality(dataset.id).await {
        Ok(report) => {
            for column in &report.nunique {
                println!("{:<24} {:>8}", column.column, column.unique);
            }
        }
        Err(e) => println!("cardinality unavailable: {}", e),
    }

    println!("\n== Top correlations ==");
    match api.correlations(dataset.id).await {
        Ok(report) => {
            for pair in &report.pairs {
                println!("{:<36} {:>6.3}", format!("{} ~ {}", pair.a, pair.b), pair.corr);
            }
        }
        Err(e) => println!("correlations unavailable: {}", e),
    }

    println!("\n== Head preview ==");
    match api.head(dataset.id, HEAD_PREVIEW_ROWS).await {
        Ok(report) => print!("{}", render_text_table(&TableData::from_records(&report.head))),
        Err(e) => println!("head preview unavailable: {}", e),
    }

    println!("\n== Duplicate rows ==");
    match api.duplicates(dataset.id).await {
        Ok(report) => {
            println!("{} duplicated rows", fmt_count(report.count));
            print!(
                "{}",
                render_text_table(&TableData::from_records(&report.duplicates_sample))
            );
        }
        Err(e) => println!("duplicates unavailable: {}", e),
    }

    // Histogram of the first column, as on the dashboard.
    if let Ok(report) = api.columns(dataset.id).await {
        if let Some(column) = report.columns.first() {
            println!("\n== Histogram: {} ==", column);
            match api.histogram(dataset.id, column).await {
                Ok(view) => print_histogram(&view),
                Err(e) => println!("histogram unavailable: {}", e),
            }
        }
    }

    Ok(())
}

fn print_histogram(view: &HistogramView) {
    let (labels, counts) = match view {
        HistogramView::Numeric { edges, counts } => (numeric_bin_labels(edges), counts),
        HistogramView::Categorical { labels, counts }
        | HistogramView::Datetime { labels, counts } => (labels.clone(), counts),
    };
    for (label, count) in labels.iter().zip(counts) {
        println!("{:<24} {:>8}", label, count);
    }
}

/// Fixed-width text rendering of a table, column widths sized to content.
fn render_text_table(table: &TableData) -> String {
    if table.is_empty() {
        return "No data.\n".to_string();
    }

    const MAX_CELL_WIDTH: usize = 24;
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let mut out = String::new();
    render_row(&mut out, &table.columns, &widths);
    for row in &table.rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let text: String = cell.chars().take(*width).collect();
        out.push_str(&format!("{:<1$}", text, width));
    }
    out.push('\n');
}
