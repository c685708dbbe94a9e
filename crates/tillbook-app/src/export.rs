//! # CSV Export
//!
//! Turns any list of serializable records into a quoted-CSV document, with
//! per-column formatting for dates and currency.
//!
//! ## Document Shape
//! - header row built from column labels
//! - one row per record
//! - every value double-quoted, embedded quotes doubled
//! - currency columns print two decimals, no symbol
//! - date columns print per the column's [`DateStyle`]
//! - missing values print as empty strings
//!
//! `write_csv` drops the document next to wherever the caller points it,
//! which is this application's analogue of a browser download.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, AppResult, ErrorCode};
use tillbook_core::currency::format_currency_plain;
use tillbook_core::dates::{format_date, DateStyle};

// =============================================================================
// Column Spec
// =============================================================================

/// How a column's raw value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// RFC 3339 timestamps, rendered per the column's date style.
    Date,
    /// Numbers rendered with two decimals and no symbol.
    Currency,
}

/// One exported column: which record field, what header label, and how to
/// format the value.
#[derive(Debug, Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub kind: Option<ColumnKind>,
    pub date_style: DateStyle,
}

impl Column {
    /// A plain text column.
    pub fn text(key: &str, label: &str) -> Self {
        Column {
            key: key.to_string(),
            label: label.to_string(),
            kind: None,
            date_style: DateStyle::default(),
        }
    }

    /// A currency column.
    pub fn currency(key: &str, label: &str) -> Self {
        Column {
            kind: Some(ColumnKind::Currency),
            ..Column::text(key, label)
        }
    }

    /// A date column with the given style.
    pub fn date(key: &str, label: &str, style: DateStyle) -> Self {
        Column {
            kind: Some(ColumnKind::Date),
            date_style: style,
            ..Column::text(key, label)
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Builds a CSV document from records and a column spec.
///
/// An empty record list yields an empty document (no header), matching the
/// "nothing to export" behavior of the screens.
pub fn generate_csv<T: Serialize>(records: &[T], columns: &[Column]) -> AppResult<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(columns.iter().map(|c| c.label.as_str()))
        .map_err(csv_error)?;

    for record in records {
        let value = serde_json::to_value(record).map_err(|e| {
            AppError::validation(format!("record is not exportable: {e}"))
        })?;
        let row: Vec<String> = columns.iter().map(|c| format_cell(&value, c)).collect();
        writer.write_record(&row).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::new(ErrorCode::StorageError, e.to_string()))?;
    let mut document = String::from_utf8(bytes)
        .map_err(|e| AppError::new(ErrorCode::StorageError, e.to_string()))?;

    // The writer terminates the last record too; the document has no
    // trailing newline.
    while document.ends_with('\n') || document.ends_with('\r') {
        document.pop();
    }
    Ok(document)
}

/// Builds a CSV document and writes it to `path`.
pub fn write_csv<T: Serialize>(records: &[T], columns: &[Column], path: &Path) -> AppResult<()> {
    let document = generate_csv(records, columns)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::new(ErrorCode::StorageError, e.to_string()))?;
    }
    fs::write(path, document)
        .map_err(|e| AppError::new(ErrorCode::StorageError, e.to_string()))?;

    info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(())
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::new(ErrorCode::StorageError, e.to_string())
}

fn format_cell(record: &Value, column: &Column) -> String {
    let value = match record.get(&column.key) {
        Some(Value::Null) | None => return String::new(),
        Some(v) => v,
    };

    match column.kind {
        Some(ColumnKind::Currency) => {
            let amount = value
                .as_f64()
                .or_else(|| value.as_str().and_then(|s| s.parse().ok()));
            match amount {
                Some(a) => format_currency_plain(a),
                None => plain(value),
            }
        }
        Some(ColumnKind::Date) => match value.as_str() {
            Some(s) => match s.parse::<chrono::DateTime<chrono::Utc>>() {
                Ok(date) => format_date(date, column.date_style),
                Err(_) => s.to_string(),
            },
            None => plain(value),
        },
        None => plain(value),
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
