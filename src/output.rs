//! Output of computed tables.
//!
//! Supports pretty-printing, JSON on stdout, and CSV files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::View;

pub const ROWS_FILE: &str = "rows.csv";
pub const SERIES_FILE: &str = "series.csv";
pub const COMPARISON_FILE: &str = "comparison.csv";

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl Debug) {
    debug!("{:#?}", value);
}

/// Writes a value to stdout as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
///
/// The header comes from the row type's field names; an empty table produces
/// an empty file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the three tables of `view` into `dir`, creating it if needed.
/// Returns the written paths.
pub fn write_view(dir: &Path, view: &View) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let rows = dir.join(ROWS_FILE);
    let series = dir.join(SERIES_FILE);
    let comparison = dir.join(COMPARISON_FILE);

    write_table(&rows, &view.rows)?;
    write_table(&series, &view.series)?;
    write_table(&comparison, &view.comparison)?;

    info!(dir = %dir.display(), "View tables written");
    Ok(vec![rows, series, comparison])
}
