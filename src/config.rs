use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::analyzers::{Metric, SortOrder, ViewParams};
use crate::dataset::DatasetSummary;
use crate::regions::REGION_NAMES;

/// Initial filter state for a view, i.e. what "reset filters" returns to.
///
/// Stored as a JSON object on disk; every key is optional:
/// ```json
/// {
///   "metric": "vci",
///   "region": 9,
///   "week_range": [10, 30],
///   "year_range": [2000, 2024],
///   "sort": "descending"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewDefaults {
    pub metric: Metric,
    /// Falls back to the first region present in the data.
    pub region: Option<i32>,
    pub week_range: (i32, i32),
    pub year_range: (i32, i32),
    pub sort: SortOrder,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        ViewDefaults {
            metric: Metric::Vhi,
            region: None,
            week_range: (1, 52),
            year_range: (1981, 2024),
            sort: SortOrder::None,
        }
    }
}

impl ViewDefaults {
    /// Loads defaults from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid view config {}", path.display()))
    }

    /// Builds view parameters against the regions actually present.
    pub fn to_params(&self, summary: &DatasetSummary) -> ViewParams {
        let region = self
            .region
            .or_else(|| summary.regions.first().map(|(code, _)| *code))
            .unwrap_or(REGION_NAMES[0].0);

        ViewParams {
            metric: self.metric,
            region,
            week_range: self.week_range,
            year_range: self.year_range,
            sort: self.sort,
        }
    }
}
