//! Best-effort parser for NOAA VHI province text files.
//!
//! A source file looks like:
//!
//! ```text
//! <tt><pre>1981,  1,  Province= 1: Вінницька, 1981-2024 ...
//! year,week, SMN,SMT,VCI,TCI,VHI
//! 1981,35,  0.148,273.36, 50.96, 31.69, 41.33,
//! ...
//! </pre></tt>
//! ```
//!
//! Failures are absorbed at the smallest unit: a bad line is skipped and the
//! file continues, a bad header skips the whole file, and a bad file never
//! stops the others from being read.

use anyhow::{Context, Result, anyhow};
use glob::{Pattern, glob};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

use crate::dataset::{Dataset, RawRecord};
use crate::stats::IngestStats;

/// File name pattern matched inside the source directory.
pub const SOURCE_FILE_PATTERN: &str = "VHI_*.csv";

/// Literal markup wrapped around the data block.
pub const MARKUP_TOKENS: &[&str] = &["<tt><pre>", "</tt></pre>"];

/// Minimum non-empty comma separated fields for a data line.
pub const MIN_FIELDS: usize = 7;

/// Lines before the first candidate data line (region header + column header).
const HEADER_LINES: usize = 2;

static PROVINCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Province=([^:]*)").expect("province pattern is valid"));

/// Records extracted from one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub region: i32,
    pub records: Vec<RawRecord>,
    pub data_lines: usize,
    pub lines_skipped: usize,
}

/// Extracts the region code from a file's first line (`...Province= 7: ...`).
pub fn extract_region_id(line: &str) -> Result<i32> {
    let raw = PROVINCE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| anyhow!("`Province=` marker not found in header"))?;

    raw.parse::<i32>()
        .with_context(|| format!("region code `{}` is not an integer", raw))
}

/// Strips markup and whitespace. Returns `None` for lines carrying no data.
pub fn clean_line(line: &str) -> Option<String> {
    let mut cleaned = line.to_string();
    for token in MARKUP_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.starts_with('<') {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parses one cleaned data line into a record for `region`.
///
/// Fields beyond the seventh are ignored; empty fields left by trailing
/// commas are dropped before counting.
pub fn parse_record_line(line: &str, region: i32) -> Result<RawRecord> {
    let fields: Vec<&str> = line
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if fields.len() < MIN_FIELDS {
        return Err(anyhow!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            fields.len()
        ));
    }

    let float = |idx: usize, name: &str| -> Result<f64> {
        fields[idx]
            .parse::<f64>()
            .with_context(|| format!("{} `{}` is not a number", name, fields[idx]))
    };

    Ok(RawRecord {
        year: fields[0]
            .parse()
            .with_context(|| format!("year `{}` is not an integer", fields[0]))?,
        week: fields[1]
            .parse()
            .with_context(|| format!("week `{}` is not an integer", fields[1]))?,
        smn: float(2, "smn")?,
        smt: float(3, "smt")?,
        vci: float(4, "vci")?,
        tci: float(5, "tci")?,
        vhi: float(6, "vhi")?,
        region,
    })
}

/// Parses the full text of one source file.
///
/// Only a missing or malformed region header is an error; bad data lines are
/// counted and skipped.
pub fn parse_file_contents(text: &str) -> Result<ParsedFile> {
    let header = text
        .lines()
        .next()
        .ok_or_else(|| anyhow!("file is empty"))?;
    let region = extract_region_id(header)?;

    let mut parsed = ParsedFile {
        region,
        records: Vec::new(),
        data_lines: 0,
        lines_skipped: 0,
    };

    for (idx, line) in text.lines().enumerate().skip(HEADER_LINES) {
        let Some(cleaned) = clean_line(line) else {
            continue;
        };
        parsed.data_lines += 1;

        match parse_record_line(&cleaned, region) {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                trace!(line = idx + 1, error = %e, "Skipping data line");
                parsed.lines_skipped += 1;
            }
        }
    }

    Ok(parsed)
}

/// Reads and parses one source file from disk.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_file_contents(&text).with_context(|| format!("bad header in {}", path.display()))
}

/// Lists files in `dir` matching `pattern`, sorted by path. A missing
/// directory yields no files.
pub fn discover_files(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);

    let entries = match glob(&full) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(pattern = %full, error = %e, "Invalid source file pattern");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Cannot read directory entry");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

/// Builds the unified dataset from every `VHI_*.csv` file in `dir`.
pub fn parse_directory(dir: impl AsRef<Path>) -> Dataset {
    parse_directory_with_stats(dir, SOURCE_FILE_PATTERN).0
}

/// Like [`parse_directory`] with a custom file pattern, also returning the
/// ingestion counters.
#[tracing::instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn parse_directory_with_stats(dir: impl AsRef<Path>, pattern: &str) -> (Dataset, IngestStats) {
    let files = discover_files(dir.as_ref(), pattern);
    let mut stats = IngestStats {
        files_matched: files.len(),
        ..Default::default()
    };
    debug!(files = files.len(), "Source files discovered");

    let mut raw = Vec::new();
    for path in &files {
        match parse_file(path) {
            Ok(parsed) => {
                stats.files_parsed += 1;
                stats.data_lines += parsed.data_lines;
                stats.lines_skipped += parsed.lines_skipped;
                stats.records_parsed += parsed.records.len();
                if parsed.records.is_empty() {
                    stats.files_empty += 1;
                    debug!(path = %path.display(), "File yielded no records");
                }
                debug!(
                    path = %path.display(),
                    region = parsed.region,
                    records = parsed.records.len(),
                    skipped = parsed.lines_skipped,
                    "File parsed"
                );
                raw.extend(parsed.records);
            }
            Err(e) => {
                stats.files_skipped += 1;
                warn!(path = %path.display(), error = %format!("{:#}", e), "Skipping source file");
            }
        }
    }

    let (dataset, dropped) = Dataset::from_raw(raw);
    stats.sentinel_rows_dropped = dropped;
    stats.rows_kept = dataset.len();

    info!(
        files = stats.files_matched,
        skipped_files = stats.files_skipped,
        rows = stats.rows_kept,
        sentinel_dropped = dropped,
        "Ingestion complete"
    );

    (dataset, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "<tt><pre>1981,  1,  Province= 3: Дніпропетровська, 1981-2024\n\
year,week, SMN,SMT,VCI,TCI,VHI\n\
1981,35,  0.148,273.36, 50.96, 31.69, 41.33,\n\
1981,36,  0.152,272.94, 47.95, 32.14, 40.04,\n\
1981,37,  0.149,270.06, -1.00, -1.00, -1.00,\n\
</pre></tt>\n";

    #[test]
    fn test_extract_region_id() {
        assert_eq!(
            extract_region_id("<tt><pre>1981,  1,  Province= 7: Запорізька").unwrap(),
            7
        );
        assert_eq!(extract_region_id("Province=12").unwrap(), 12);
        assert_eq!(extract_region_id("Province= -3: unknown").unwrap(), -3);
    }

    #[test]
    fn test_extract_region_id_failures() {
        assert!(extract_region_id("year,week,SMN").is_err());
        assert!(extract_region_id("Province= x: Київська").is_err());
        assert!(extract_region_id("Province=: nothing").is_err());
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(
            clean_line("<tt><pre>1982, 1, 0.1, 2, 3, 4, 5").as_deref(),
            Some("1982, 1, 0.1, 2, 3, 4, 5")
        );
        assert_eq!(clean_line("   \t"), None);
        assert_eq!(clean_line("</pre></tt>"), None);
        assert_eq!(clean_line("</tt></pre>"), None);
    }

    #[test]
    fn test_parse_record_line_exact_values() {
        let rec = parse_record_line("1981,35,  0.148,273.36, 50.96, 31.69, 41.33,", 3).unwrap();
        assert_eq!(
            rec,
            RawRecord {
                year: 1981,
                week: 35,
                smn: 0.148,
                smt: 273.36,
                vci: 50.96,
                tci: 31.69,
                vhi: 41.33,
                region: 3,
            }
        );
    }

    #[test]
    fn test_parse_record_line_ignores_extra_fields() {
        let rec = parse_record_line("2000,1,1,2,3,4,5,6,7", 1).unwrap();
        assert_eq!(rec.vhi, 5.0);
    }

    #[test]
    fn test_parse_record_line_too_few_fields() {
        assert!(parse_record_line("2000,1,1,2,3,4", 1).is_err());
        // trailing commas do not count as fields
        assert!(parse_record_line("2000,1,1,2,3,4,,,", 1).is_err());
    }

    #[test]
    fn test_parse_record_line_non_numeric() {
        assert!(parse_record_line("year,week,SMN,SMT,VCI,TCI,VHI", 1).is_err());
        assert!(parse_record_line("2000.5,1,1,2,3,4,5", 1).is_err());
        assert!(parse_record_line("2000,1,1,2,3,abc,5", 1).is_err());
    }

    #[test]
    fn test_parse_file_contents() {
        let parsed = parse_file_contents(SAMPLE).unwrap();
        assert_eq!(parsed.region, 3);
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.data_lines, 3);
        assert_eq!(parsed.lines_skipped, 0);
        assert_eq!(parsed.records[1].week, 36);
    }

    #[test]
    fn test_bad_line_does_not_abort_file() {
        let text = "Province= 1: x\nheader\n2000,1,1,2,3\n2000,2,1,2,3,4,5\n2000,x,1,2,3,4,5\n2000,3,1,2,3,4,6\n";
        let parsed = parse_file_contents(text).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.lines_skipped, 2);
        assert_eq!(parsed.records[1].week, 3);
    }

    #[test]
    fn test_second_line_is_always_skipped() {
        let text = "Province= 1: x\n2000,1,1,2,3,4,5\n2000,2,1,2,3,4,5\n";
        let parsed = parse_file_contents(text).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].week, 2);
    }

    #[test]
    fn test_missing_province_fails_file() {
        assert!(parse_file_contents("no marker here\nheader\n2000,1,1,2,3,4,5\n").is_err());
        assert!(parse_file_contents("").is_err());
    }

    #[test]
    fn test_negative_region_keeps_rows_without_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("VHI_neg.csv"),
            "Province=-3: x\nheader\n2000,1,1,2,3,4,5\n",
        )
        .unwrap();

        let ds = parse_directory(dir.path());
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].region, -3);
        assert_eq!(ds.records()[0].region_name, None);
    }

    #[test]
    fn test_parse_directory_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (ds, stats) = parse_directory_with_stats(dir.path().join("nope"), SOURCE_FILE_PATTERN);
        assert!(ds.is_empty());
        assert_eq!(stats.files_matched, 0);
    }

    #[test]
    fn test_parse_directory_skips_bad_files_and_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("VHI_1.csv"), SAMPLE).unwrap();
        fs::write(dir.path().join("VHI_2.csv"), "garbage\n\n2000,1,1,2,3,4,5\n").unwrap();
        fs::write(dir.path().join("VHI_3.csv"), [0xffu8, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("other.csv"), SAMPLE).unwrap();

        let (ds, stats) = parse_directory_with_stats(dir.path(), SOURCE_FILE_PATTERN);

        assert_eq!(stats.files_matched, 3);
        assert_eq!(stats.files_parsed, 1);
        assert_eq!(stats.files_skipped, 2);
        assert_eq!(stats.records_parsed, 3);
        assert_eq!(stats.sentinel_rows_dropped, 1);
        assert_eq!(ds.len(), 2);
        assert!(ds.records().iter().all(|r| r.region == 3));
    }
}
