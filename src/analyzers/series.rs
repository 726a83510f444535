use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::analyzers::types::{Metric, SeriesPoint};
use crate::dataset::VhiRecord;

/// Calendar date for `(year, week)`, matching `strptime("%Y %W %w")` with
/// weekday `0`: week 1 begins on the first Monday of the year and the date is
/// the Sunday closing that week. Week 0 is the Sunday before the first Monday.
pub fn week_date(year: i32, week: i32) -> Option<NaiveDate> {
    if week < 0 {
        return None;
    }
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_weekday = jan1.weekday().num_days_from_monday() as u64;

    let offset = if week == 0 {
        6 - first_weekday
    } else {
        let week_0_length = (7 - first_weekday) % 7;
        week_0_length + 7 * (week as u64 - 1) + 6
    };

    jan1.checked_add_days(Days::new(offset))
}

/// Time-ordered series of `metric` over already filtered rows. Every row
/// keeps all its columns next to the date key.
///
/// Points are ordered by calendar date regardless of input order; rows whose
/// date cannot be computed are left out.
pub fn build_series(rows: &[VhiRecord], metric: Metric) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .filter_map(|r| match week_date(r.year, r.week) {
            Some(date) => Some(SeriesPoint::new(date, r, metric)),
            None => {
                debug!(year = r.year, week = r.week, "No calendar date for row, omitted from series");
                None
            }
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}
