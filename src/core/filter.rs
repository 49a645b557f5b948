//! Inclusive date-range filtering of the daily table

use crate::core::types::{DailyRecord, DateRange};

/// Rows whose date lies in `range`, in input order.
///
/// A reversed range (`start > end`) yields an empty result rather than an error.
pub(crate) fn filter_daily<'a>(records: &'a [DailyRecord], range: &DateRange) -> Vec<&'a DailyRecord> {
    if range.is_reversed() {
        log::warn!(
            "start date {} is after end date {}; no days selected",
            range.start,
            range.end
        );
        return Vec::new();
    }

    records.iter().filter(|r| range.contains(r.date)).collect()
}
