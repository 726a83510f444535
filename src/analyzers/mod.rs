//! Filtering, sorting and aggregation over the unified dataset.
//!
//! Each call reads the dataset and returns fresh tables; the dataset is never
//! mutated, so one dataset can back any number of views.

pub mod aggregate;
pub mod filter;
pub mod series;
pub mod types;
pub mod utility;
pub mod view;

pub use aggregate::compare_regions;
pub use filter::filter_rows;
pub use series::{build_series, week_date};
pub use types::{Metric, RegionMean, SeriesPoint, SortOrder, SortResolution, View, ViewParams};
pub use view::view;
