//! Core module - typed records, range filtering and aggregation

mod aggregator;
mod context;
mod filter;
mod types;

pub(crate) use context::Dataset;
pub(crate) use types::{
    DailyRecord, Dashboard, DatasetInfo, DateRange, GroupStats, HourlyRecord, HourlyTotals,
    TemperatureSeries, Weather, WeatherCasual, WorkdaySplit,
};
