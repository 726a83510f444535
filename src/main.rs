//! CLI entry point for the VHI explorer.
//!
//! Ingests a directory of `VHI_*.csv` province files and prints or writes the
//! data table, time series and region comparison for a chosen filter set.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vhi_explorer::analyzers::{Metric, SortOrder, view};
use vhi_explorer::config::ViewDefaults;
use vhi_explorer::dataset::Dataset;
use vhi_explorer::output::{print_json, print_pretty, write_view};
use vhi_explorer::parser::{SOURCE_FILE_PATTERN, parse_directory_with_stats};
use vhi_explorer::regions::{REGION_NAMES, canonical_code};

#[derive(Parser)]
#[command(name = "vhi_explorer")]
#[command(about = "Filter and compare Vegetation Health Index data by region", long_about = None)]
struct Cli {
    /// Directory containing the VHI_*.csv source files
    #[arg(short, long, env = "VHI_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    /// File name pattern of source files inside the data directory
    #[arg(long, default_value = SOURCE_FILE_PATTERN, global = true)]
    pattern: String,

    /// Drop repeated (region, year, week) rows, keeping the first
    #[arg(long, default_value_t = false, global = true)]
    dedup: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show regions present in the data and the week/year bounds
    Summary,
    /// List the static region directory with canonical codes
    Regions,
    /// Compute the data table, time series and region comparison
    View {
        /// JSON file with default filter values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Index to analyze
        #[arg(short, long, value_enum)]
        metric: Option<Metric>,

        /// Region code (defaults to the first region present)
        #[arg(short, long)]
        region: Option<i32>,

        #[arg(long)]
        week_min: Option<i32>,

        #[arg(long)]
        week_max: Option<i32>,

        #[arg(long)]
        year_min: Option<i32>,

        #[arg(long)]
        year_max: Option<i32>,

        /// Sort rows ascending by the metric
        #[arg(long, default_value_t = false)]
        sort_asc: bool,

        /// Sort rows descending by the metric
        #[arg(long, default_value_t = false)]
        sort_desc: bool,

        /// Directory to write rows.csv, series.csv and comparison.csv to;
        /// prints JSON to stdout when omitted
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vhi_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vhi_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary => {
            let dataset = load_dataset(&cli.data_dir, &cli.pattern, cli.dedup);
            print_json(&dataset.summary())?;
        }
        Commands::Regions => {
            for (code, name) in REGION_NAMES {
                info!(code, name, canonical = ?canonical_code(*code), "Region");
            }
        }
        Commands::View {
            config,
            metric,
            region,
            week_min,
            week_max,
            year_min,
            year_max,
            sort_asc,
            sort_desc,
            output_dir,
        } => {
            let mut defaults = match config {
                Some(path) => ViewDefaults::load(path)?,
                None => ViewDefaults::default(),
            };

            if let Some(metric) = metric {
                defaults.metric = metric;
            }
            if region.is_some() {
                defaults.region = region;
            }
            defaults.week_range = (
                week_min.unwrap_or(defaults.week_range.0),
                week_max.unwrap_or(defaults.week_range.1),
            );
            defaults.year_range = (
                year_min.unwrap_or(defaults.year_range.0),
                year_max.unwrap_or(defaults.year_range.1),
            );
            if sort_asc || sort_desc {
                let resolved = SortOrder::resolve(sort_asc, sort_desc);
                if resolved.conflict {
                    warn!("Both sort options selected. Defaulting to ascending.");
                }
                defaults.sort = resolved.order;
            }

            let dataset = load_dataset(&cli.data_dir, &cli.pattern, cli.dedup);
            let params = defaults.to_params(&dataset.summary());
            info!(
                metric = %params.metric,
                region = params.region,
                weeks = ?params.week_range,
                years = ?params.year_range,
                sort = ?params.sort,
                "Computing view"
            );

            let result = view(&dataset, &params);
            print_pretty(&params);

            match output_dir {
                Some(dir) => {
                    write_view(&dir, &result)?;
                }
                None => print_json(&result)?,
            }
        }
    }

    Ok(())
}

/// Runs one ingestion pass over `data_dir`.
#[tracing::instrument(fields(data_dir = %data_dir.display()))]
fn load_dataset(data_dir: &Path, pattern: &str, dedup: bool) -> Dataset {
    let (dataset, stats) = parse_directory_with_stats(data_dir, pattern);

    if stats.files_matched == 0 {
        warn!("No source files found");
    } else if stats.files_skipped > 0 {
        warn!(
            skipped = stats.files_skipped,
            pct = stats.file_skip_pct(),
            "Some source files were skipped"
        );
    }
    info!(
        rows = stats.rows_kept,
        line_yield_pct = stats.line_yield_pct(),
        "Dataset ready"
    );

    if dedup {
        let deduped = dataset.dedup();
        info!(
            removed = dataset.len() - deduped.len(),
            "Duplicate (region, year, week) rows removed"
        );
        deduped
    } else {
        dataset
    }
}
