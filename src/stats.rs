use serde::Serialize;

/// Counters collected over one ingestion pass.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct IngestStats {
    // files
    pub files_matched: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub files_empty: usize,

    // lines
    pub data_lines: usize,
    pub lines_skipped: usize,

    // rows
    pub records_parsed: usize,
    pub sentinel_rows_dropped: usize,
    pub rows_kept: usize,
}

impl IngestStats {
    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of candidate data lines that produced a record.
    pub fn line_yield_pct(&self) -> f64 {
        Self::pct(self.records_parsed, self.data_lines)
    }

    /// Share of matched files that were skipped outright.
    pub fn file_skip_pct(&self) -> f64 {
        Self::pct(self.files_skipped, self.files_matched)
    }
}
