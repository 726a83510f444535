use tracing::debug;

use crate::analyzers::aggregate::compare_regions;
use crate::analyzers::filter::filter_rows;
use crate::analyzers::series::build_series;
use crate::analyzers::types::{View, ViewParams};
use crate::dataset::Dataset;

/// Computes the row table, the time series and the region comparison for one
/// request. Never fails; ranges that match nothing give empty tables.
pub fn view(dataset: &Dataset, params: &ViewParams) -> View {
    let rows = filter_rows(dataset, params);
    let series = build_series(&rows, params.metric);
    let comparison = compare_regions(dataset, params);

    debug!(
        metric = %params.metric,
        region = params.region,
        rows = rows.len(),
        series = series.len(),
        regions = comparison.len(),
        "View computed"
    );

    View {
        metric: params.metric,
        region: params.region,
        rows,
        series,
        comparison,
    }
}
