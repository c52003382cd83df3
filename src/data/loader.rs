//! CSV loading into the in-memory tables.
//!
//! Each table loads independently: a missing or malformed source file is
//! reported and leaves that table empty, while the remaining tables still
//! load. Rows keep their source file order and are never mutated afterwards.

use crate::config::DataConfig;
use crate::models::{BattingRecord, BowlingRecord, FieldingRecord, StatsError, TeamRecord};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

/// The four season tables, held read-only for the process lifetime.
#[derive(Debug, Default)]
pub struct DataStore {
    /// Batting rows in source file order.
    pub batting: Vec<BattingRecord>,
    /// Bowling rows in source file order.
    pub bowling: Vec<BowlingRecord>,
    /// Fielding rows in source file order.
    pub fielding: Vec<FieldingRecord>,
    /// Standings rows in source file order.
    pub teams: Vec<TeamRecord>,
    /// Errors encountered while loading; tables named here are empty.
    pub load_errors: Vec<StatsError>,
}

impl DataStore {
    /// Load all four tables from the configured paths.
    ///
    /// Never fails as a whole: per-table failures are logged, recorded in
    /// `load_errors`, and leave that table empty.
    pub fn load(config: &DataConfig) -> Self {
        let mut load_errors = Vec::new();

        let store = DataStore {
            batting: load_or_empty(&mut load_errors, "batting", &config.batting),
            bowling: load_or_empty(&mut load_errors, "bowling", &config.bowling),
            fielding: load_or_empty(&mut load_errors, "fielding", &config.fielding),
            teams: load_or_empty(&mut load_errors, "team standings", &config.teams),
            load_errors,
        };

        debug!(
            batting = store.batting.len(),
            bowling = store.bowling.len(),
            fielding = store.fielding.len(),
            teams = store.teams.len(),
            "datasets loaded"
        );

        store
    }

    /// Standings sorted by position ascending. The stored rows keep their
    /// file order; this is a query-time copy.
    pub fn team_standings(&self) -> Vec<TeamRecord> {
        let mut standings = self.teams.clone();
        standings.sort_by_key(|t| t.position);
        standings
    }

    /// True when every table loaded empty.
    pub fn is_empty(&self) -> bool {
        self.batting.is_empty()
            && self.bowling.is_empty()
            && self.fielding.is_empty()
            && self.teams.is_empty()
    }
}

fn load_or_empty<T: DeserializeOwned>(
    errors: &mut Vec<StatsError>,
    table: &'static str,
    path: &Path,
) -> Vec<T> {
    match load_table(table, path) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("{e}: table left empty");
            errors.push(e);
            Vec::new()
        }
    }
}

/// Read one CSV table. The header row is required and must carry the
/// expected column names; extra columns are ignored, missing ones fail
/// the whole table.
pub fn load_table<T: DeserializeOwned>(
    table: &'static str,
    path: &Path,
) -> Result<Vec<T>, StatsError> {
    let data_load = |source: csv::Error| StatsError::DataLoad {
        table,
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(data_load)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(data_load)?);
    }

    Ok(rows)
}
