//! The unified VHI table built by one ingestion pass.

use serde::Serialize;
use std::collections::HashSet;

use crate::regions::{REGION_NAMES, region_name};

/// Column headers as they appear in the source files, before normalization.
pub const SOURCE_COLUMNS: &[&str] = &["Year", "Week", "SMN", "SMT", "VCI", "TCI", "VHI", "Region"];

/// Derived column attached after concatenation.
pub const REGION_NAME_COLUMN: &str = "region_name";

/// `vhi` value marking a missing observation.
pub const VHI_SENTINEL: f64 = -1.0;

/// One weekly observation as parsed from a source line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub year: i32,
    pub week: i32,
    pub smn: f64,
    pub smt: f64,
    pub vci: f64,
    pub tci: f64,
    pub vhi: f64,
    pub region: i32,
}

/// A row of the unified dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VhiRecord {
    pub year: i32,
    pub week: i32,
    pub smn: f64,
    pub smt: f64,
    pub vci: f64,
    pub tci: f64,
    pub vhi: f64,
    pub region: i32,
    pub region_name: Option<String>,
}

impl From<RawRecord> for VhiRecord {
    fn from(raw: RawRecord) -> Self {
        VhiRecord {
            region_name: region_name(raw.region).map(str::to_string),
            year: raw.year,
            week: raw.week,
            smn: raw.smn,
            smt: raw.smt,
            vci: raw.vci,
            tci: raw.tci,
            vhi: raw.vhi,
            region: raw.region,
        }
    }
}

/// Lower-cases a column name and replaces every non-ASCII-alphanumeric
/// character with `_`.
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Values a presentation layer needs to populate its selection controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    /// `(region code, region name)` for every directory region present in the data.
    pub regions: Vec<(i32, String)>,
    pub week_bounds: Option<(i32, i32)>,
    pub year_bounds: Option<(i32, i32)>,
}

/// Immutable concatenation of all valid records from one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<VhiRecord>,
}

impl Dataset {
    /// Builds the dataset from concatenated raw records, dropping sentinel
    /// rows and attaching region names. Returns the dataset and the number
    /// of rows dropped for `vhi == -1`.
    pub fn from_raw(raw: Vec<RawRecord>) -> (Self, usize) {
        let total = raw.len();
        let records: Vec<VhiRecord> = raw
            .into_iter()
            .filter(|r| r.vhi != VHI_SENTINEL)
            .map(VhiRecord::from)
            .collect();
        let dropped = total - records.len();

        (Dataset { records }, dropped)
    }

    pub fn records(&self) -> &[VhiRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalized column names, in output order.
    pub fn columns() -> Vec<String> {
        SOURCE_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(REGION_NAME_COLUMN))
            .map(normalize_column_name)
            .collect()
    }

    /// Returns a copy without repeated `(region, year, week)` rows. The first
    /// occurrence in concatenation order wins.
    pub fn dedup(&self) -> Dataset {
        let mut seen = HashSet::new();
        let records = self
            .records
            .iter()
            .filter(|r| seen.insert((r.region, r.year, r.week)))
            .cloned()
            .collect();

        Dataset { records }
    }

    pub fn summary(&self) -> DatasetSummary {
        let present: HashSet<i32> = self.records.iter().map(|r| r.region).collect();
        let regions = REGION_NAMES
            .iter()
            .filter(|(code, _)| present.contains(code))
            .map(|(code, name)| (*code, name.to_string()))
            .collect();

        DatasetSummary {
            rows: self.records.len(),
            regions,
            week_bounds: bounds(self.records.iter().map(|r| r.week)),
            year_bounds: bounds(self.records.iter().map(|r| r.year)),
        }
    }
}

fn bounds(values: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
