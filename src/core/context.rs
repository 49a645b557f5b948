//! Immutable dataset context shared by every dashboard computation

use chrono::NaiveDate;

use crate::core::aggregator::{hourly_totals, temperature_series, weather_casual, workday_split};
use crate::core::filter::filter_daily;
use crate::core::types::{
    DailyRecord, Dashboard, DatasetInfo, DateRange, HourlyRecord, HourlyTotals, TemperatureSeries,
    WeatherCasual, WorkdaySplit,
};

/// Both tables, loaded once at startup and only ever borrowed afterwards
#[derive(Debug, Clone, Default)]
pub(crate) struct Dataset {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
}

impl Dataset {
    pub(crate) fn new(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        Self { daily, hourly }
    }

    pub(crate) fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub(crate) fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Earliest and latest date of the daily table
    pub(crate) fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.daily.iter().map(|r| r.date).min()?;
        let max = self.daily.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    pub(crate) fn info(&self) -> DatasetInfo {
        let bounds = self.date_bounds();
        DatasetInfo {
            first_day: bounds.map(|(min, _)| min),
            last_day: bounds.map(|(_, max)| max),
            daily_rows: self.daily.len(),
            hourly_rows: self.hourly.len(),
        }
    }

    /// Resolve optional bounds against the table, defaulting to its full span
    pub(crate) fn resolve_range(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Option<DateRange> {
        let bounds = self.date_bounds();
        let start = since.or(bounds.map(|(min, _)| min))?;
        let end = until.or(bounds.map(|(_, max)| max))?;

        if let Some((min, max)) = bounds
            && (start < min || end > max)
        {
            log::warn!("requested range {start}..={end} extends beyond the data ({min}..={max})");
        }

        Some(DateRange::new(start, end))
    }

    pub(crate) fn filtered(&self, range: &DateRange) -> Vec<&DailyRecord> {
        filter_daily(&self.daily, range)
    }

    pub(crate) fn workday(&self, range: &DateRange) -> WorkdaySplit {
        workday_split(self.filtered(range))
    }

    pub(crate) fn weather(&self) -> Vec<WeatherCasual> {
        weather_casual(&self.daily)
    }

    pub(crate) fn hourly_totals(&self) -> Vec<HourlyTotals> {
        hourly_totals(&self.hourly)
    }

    pub(crate) fn temperature(&self) -> TemperatureSeries {
        temperature_series(&self.daily)
    }

    /// Recompute every dashboard panel for `range`.
    ///
    /// Only the working-day split follows the range; the weather and hourly
    /// panels always cover the whole dataset.
    pub(crate) fn dashboard(&self, range: DateRange) -> Dashboard {
        let filtered = self.filtered(&range);
        Dashboard {
            range,
            filtered_days: filtered.len(),
            workday: workday_split(filtered),
            weather: self.weather(),
            hourly: self.hourly_totals(),
        }
    }
}
