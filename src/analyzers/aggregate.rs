use std::collections::BTreeMap;

use crate::analyzers::types::{RegionMean, ViewParams};
use crate::analyzers::utility::{compare_values, nan_mean};
use crate::dataset::Dataset;

/// Mean of the selected metric for every region inside the week and year
/// ranges. The region filter is not applied; it only sets `is_selected`.
///
/// Rows without a region name are not grouped. NaN values are left out of
/// the mean and the count. The selected region comes first, the rest follow
/// by descending mean.
pub fn compare_regions(dataset: &Dataset, params: &ViewParams) -> Vec<RegionMean> {
    let mut groups: BTreeMap<(i32, &str), Vec<f64>> = BTreeMap::new();

    for record in dataset.records().iter().filter(|r| params.in_range(r)) {
        let Some(name) = record.region_name.as_deref() else {
            continue;
        };
        groups
            .entry((record.region, name))
            .or_default()
            .push(params.metric.value(record));
    }

    let mut comparison: Vec<RegionMean> = groups
        .into_iter()
        .map(|((region, name), values)| {
            let (mean, count) = nan_mean(&values);
            RegionMean {
                region,
                region_name: name.to_string(),
                mean,
                count,
                is_selected: region == params.region,
            }
        })
        .collect();

    comparison.sort_by(|a, b| {
        b.is_selected
            .cmp(&a.is_selected)
            .then_with(|| compare_values(a.mean, b.mean, true))
    });

    comparison
}
