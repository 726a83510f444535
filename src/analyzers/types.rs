//! Parameter and result types for the view engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dataset::VhiRecord;

/// Index a view is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Vhi,
    Vci,
    Tci,
}

impl Metric {
    pub fn value(&self, record: &VhiRecord) -> f64 {
        match self {
            Metric::Vhi => record.vhi,
            Metric::Vci => record.vci,
            Metric::Tci => record.tci,
        }
    }

    /// Normalized column name of the metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Vhi => "vhi",
            Metric::Vci => "vci",
            Metric::Tci => "tci",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column().to_uppercase())
    }
}

/// Row ordering by the selected metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Outcome of resolving the two independent sort toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortResolution {
    pub order: SortOrder,
    /// Both directions were requested; the caller should warn.
    pub conflict: bool,
}

impl SortOrder {
    /// Ascending wins when both toggles are set.
    pub fn resolve(ascending: bool, descending: bool) -> SortResolution {
        let order = match (ascending, descending) {
            (true, _) => SortOrder::Ascending,
            (false, true) => SortOrder::Descending,
            (false, false) => SortOrder::None,
        };

        SortResolution {
            order,
            conflict: ascending && descending,
        }
    }
}

/// Everything a caller chooses for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    pub metric: Metric,
    pub region: i32,
    /// Inclusive `(min, max)` week.
    pub week_range: (i32, i32),
    /// Inclusive `(min, max)` year.
    pub year_range: (i32, i32),
    pub sort: SortOrder,
}

impl ViewParams {
    pub fn in_range(&self, record: &VhiRecord) -> bool {
        (self.week_range.0..=self.week_range.1).contains(&record.week)
            && (self.year_range.0..=self.year_range.1).contains(&record.year)
    }
}

/// A filtered row keyed by its calendar date, plus the selected metric's
/// value for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub year: i32,
    pub week: i32,
    pub smn: f64,
    pub smt: f64,
    pub vci: f64,
    pub tci: f64,
    pub vhi: f64,
    pub region: i32,
    pub region_name: Option<String>,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, record: &VhiRecord, metric: Metric) -> Self {
        SeriesPoint {
            date,
            year: record.year,
            week: record.week,
            smn: record.smn,
            smt: record.smt,
            vci: record.vci,
            tci: record.tci,
            vhi: record.vhi,
            region: record.region,
            region_name: record.region_name.clone(),
            value: metric.value(record),
        }
    }
}

/// Mean of the selected metric for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMean {
    pub region: i32,
    pub region_name: String,
    pub mean: f64,
    pub count: usize,
    pub is_selected: bool,
}

/// The three tables computed for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub metric: Metric,
    pub region: i32,
    pub rows: Vec<VhiRecord>,
    pub series: Vec<SeriesPoint>,
    pub comparison: Vec<RegionMean>,
}
