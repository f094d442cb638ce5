//! Backing file loader.
//!
//! Reads the CSV from disk on every call, keeps only the requested columns and
//! parses the designated timestamp column. Nothing is cached.

use chrono::{DateTime, Utc};
use csv::StringRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File does not exist at '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid timestamp '{value}' on line {line}")]
    Timestamp { line: u64, value: String },
    #[error("Invalid value '{value}' for column {column} on line {line}")]
    Value {
        line: u64,
        column: String,
        value: String,
    },
    #[error("Dataset is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Cell contents read as missing values, same set as pandas `read_csv`.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Clone, Debug)]
pub struct Row {
    pub line: u64,
    pub timestamp: DateTime<Utc>,
    values: Vec<String>,
}

/// Rows in file order, restricted to the selected columns.
#[derive(Clone, Debug)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Raw text of `column` in `row`, `None` if the column was not selected.
    pub fn value<'a>(&self, row: &'a Row, column: &str) -> Option<&'a str> {
        self.column_index(column)
            .and_then(|idx| row.values.get(idx))
            .map(String::as_str)
    }

    /// Parses `column` in `row` as a finite float. Missing-value markers and
    /// non-finite numbers give `Ok(None)`.
    pub fn float(&self, row: &Row, column: &str) -> Result<Option<f64>> {
        let raw = self
            .value(row, column)
            .ok_or_else(|| DatasetError::MissingColumn(column.to_string()))?;
        if NA_VALUES.contains(&raw) {
            return Ok(None);
        }
        let value = raw.parse::<f64>().map_err(|_| DatasetError::Value {
            line: row.line,
            column: column.to_string(),
            value: raw.to_string(),
        })?;
        Ok(Some(value).filter(|v| v.is_finite()))
    }
}

/// Loads `timestamp_column` followed by `columns` from the CSV at `path`.
pub fn load_table(path: &Path, timestamp_column: &str, columns: &[&str]) -> Result<Table> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let header_map = build_header_map(reader.headers()?);

    let mut selected = vec![timestamp_column.to_string()];
    selected.extend(
        columns
            .iter()
            .filter(|column| **column != timestamp_column)
            .map(|column| column.to_string()),
    );

    let indices = selected
        .iter()
        .map(|column| {
            header_map
                .get(column.as_str())
                .copied()
                .ok_or_else(|| DatasetError::MissingColumn(column.clone()))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let values: Vec<String> = indices
            .iter()
            .map(|idx| record.get(*idx).unwrap_or_default().to_string())
            .collect();

        let timestamp =
            shared::timestamp::parse(&values[0]).ok_or_else(|| DatasetError::Timestamp {
                line,
                value: values[0].clone(),
            })?;

        rows.push(Row {
            line,
            timestamp,
            values,
        });
    }

    let table = Table {
        columns: selected,
        rows,
    };
    log::info!("Loaded {} rows from '{}'", table.len(), path.display());

    Ok(table)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), idx))
        .collect()
}
