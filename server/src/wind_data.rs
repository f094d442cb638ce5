use crate::config::DatasetConfig;
use crate::dataset::{self, DatasetError, Result, Table};
use shared::models::{DateBounds, DateRangeQuery, WindRecord};
use std::path::{Path, PathBuf};

/// Handle on the backing file. Every query re-reads it.
#[derive(Clone, Debug)]
pub struct WindData {
    path: PathBuf,
    timestamp_column: String,
    wind_column: String,
}

impl WindData {
    pub fn new(config: &DatasetConfig) -> WindData {
        WindData {
            path: config.path(),
            timestamp_column: config.timestamp_column.clone(),
            wind_column: config.wind_column.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Records whose timestamp falls within the inclusive `query` window, in
    /// file order.
    pub fn records_between(&self, query: &DateRangeQuery) -> Result<Vec<WindRecord>> {
        let table =
            dataset::load_table(&self.path, &self.timestamp_column, &[&self.wind_column])?;
        filter_records(&table, &self.wind_column, query)
    }

    pub fn date_bounds(&self) -> Result<DateBounds> {
        let table = dataset::load_table(&self.path, &self.timestamp_column, &[])?;
        DateBounds::from_timestamps(table.rows().iter().map(|row| row.timestamp))
            .ok_or(DatasetError::Empty)
    }
}

fn filter_records(
    table: &Table,
    wind_column: &str,
    query: &DateRangeQuery,
) -> Result<Vec<WindRecord>> {
    let mut records = Vec::new();
    let mut gaps = 0;

    for row in table.rows().iter().filter(|row| query.contains(&row.timestamp)) {
        match table.float(row, wind_column)? {
            Some(wind_mw) => records.push(WindRecord {
                timestamp: row.timestamp,
                wind_mw,
            }),
            None => gaps += 1,
        }
    }

    if gaps > 0 {
        log::debug!("Skipped {} rows without a {} value", gaps, wind_column);
    }

    Ok(records)
}
