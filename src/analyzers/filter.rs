use crate::analyzers::types::{SortOrder, ViewParams};
use crate::analyzers::utility::compare_values;
use crate::dataset::{Dataset, VhiRecord};

/// Rows of the selected region inside the week and year ranges, optionally
/// ordered by the selected metric.
///
/// The sort is stable: rows with equal metric values keep dataset order.
pub fn filter_rows(dataset: &Dataset, params: &ViewParams) -> Vec<VhiRecord> {
    let mut rows: Vec<VhiRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.region == params.region && params.in_range(r))
        .cloned()
        .collect();

    let metric = params.metric;
    match params.sort {
        SortOrder::None => {}
        SortOrder::Ascending => {
            rows.sort_by(|a, b| compare_values(metric.value(a), metric.value(b), false))
        }
        SortOrder::Descending => {
            rows.sort_by(|a, b| compare_values(metric.value(a), metric.value(b), true))
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Metric;
    use crate::dataset::RawRecord;

    fn raw(region: i32, year: i32, week: i32, vci: f64, vhi: f64) -> RawRecord {
        RawRecord {
            year,
            week,
            smn: 0.1,
            smt: 260.0,
            vci,
            tci: 30.0,
            vhi,
            region,
        }
    }

    fn params(sort: SortOrder) -> ViewParams {
        ViewParams {
            metric: Metric::Vhi,
            region: 1,
            week_range: (1, 52),
            year_range: (2000, 2020),
            sort,
        }
    }

    fn sample() -> Dataset {
        Dataset::from_raw(vec![
            raw(1, 2000, 5, 10.0, 40.0),
            raw(1, 2000, 6, 20.0, 30.0),
            raw(2, 2000, 5, 30.0, 50.0),
            raw(1, 1999, 5, 40.0, 60.0),
            raw(1, 2021, 5, 50.0, 60.0),
            raw(1, 2010, 53, 60.0, 20.0),
            raw(1, 2010, 7, 70.0, 30.0),
        ])
        .0
    }

    #[test]
    fn test_filter_predicate() {
        let rows = filter_rows(&sample(), &params(SortOrder::None));
        let keys: Vec<(i32, i32)> = rows.iter().map(|r| (r.year, r.week)).collect();
        assert_eq!(keys, vec![(2000, 5), (2000, 6), (2010, 7)]);
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let mut p = params(SortOrder::None);
        p.week_range = (6, 7);
        p.year_range = (2000, 2010);
        let rows = filter_rows(&sample(), &p);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_sort_ascending_is_stable() {
        let rows = filter_rows(&sample(), &params(SortOrder::Ascending));
        let vhi: Vec<f64> = rows.iter().map(|r| r.vhi).collect();
        assert_eq!(vhi, vec![30.0, 30.0, 40.0]);
        // equal vhi keeps dataset order: week 6 before week 7
        assert_eq!(rows[0].week, 6);
        assert_eq!(rows[1].week, 7);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let rows = filter_rows(&sample(), &params(SortOrder::Descending));
        let weeks: Vec<i32> = rows.iter().map(|r| r.week).collect();
        assert_eq!(weeks, vec![5, 6, 7]);
    }

    #[test]
    fn test_sort_keeps_order_of_signed_zeros() {
        let ds = Dataset::from_raw(vec![
            raw(1, 2000, 1, 0.0, 10.0),
            raw(1, 2000, 2, -0.0, 10.0),
            raw(1, 2000, 3, -5.0, 10.0),
        ])
        .0;

        for sort in [SortOrder::Ascending, SortOrder::Descending] {
            let mut p = params(sort);
            p.metric = Metric::Vci;
            let weeks: Vec<i32> = filter_rows(&ds, &p).iter().map(|r| r.week).collect();
            let expected = match sort {
                SortOrder::Ascending => vec![3, 1, 2],
                _ => vec![1, 2, 3],
            };
            assert_eq!(weeks, expected);
        }
    }

    #[test]
    fn test_sort_uses_selected_metric() {
        let mut p = params(SortOrder::Descending);
        p.metric = Metric::Vci;
        let rows = filter_rows(&sample(), &p);
        let vci: Vec<f64> = rows.iter().map(|r| r.vci).collect();
        assert_eq!(vci, vec![70.0, 20.0, 10.0]);
    }

    #[test]
    fn test_unknown_region_is_empty() {
        let mut p = params(SortOrder::None);
        p.region = 17;
        assert!(filter_rows(&sample(), &p).is_empty());
    }

    #[test]
    fn test_membership_ignores_rows_outside_predicate() {
        let base = filter_rows(&sample(), &params(SortOrder::None));

        let mut raws: Vec<RawRecord> = vec![raw(3, 2000, 5, 1.0, 1.0), raw(1, 1990, 5, 1.0, 1.0)];
        raws.extend(sample().records().iter().map(|r| RawRecord {
            year: r.year,
            week: r.week,
            smn: r.smn,
            smt: r.smt,
            vci: r.vci,
            tci: r.tci,
            vhi: r.vhi,
            region: r.region,
        }));
        let widened = filter_rows(&Dataset::from_raw(raws).0, &params(SortOrder::None));

        assert_eq!(base, widened);
    }
}
