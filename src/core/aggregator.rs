//! Grouped sums and means over the bike-sharing tables
//!
//! Every function here is pure: it borrows its input and returns freshly
//! allocated results. Callers pick whether to pass the filtered subset or the
//! whole table.

use crate::consts::TEMP_BANDS;
use crate::core::types::{
    DailyRecord, GroupStats, HourlyRecord, HourlyTotals, TemperatureBand, TemperaturePoint,
    TemperatureSeries, WeatherAccumulator, WeatherCasual, WorkdaySplit,
};

/// Split days by the working-day flag and sum/average total rentals per side
pub(crate) fn workday_split<'a, I>(records: I) -> WorkdaySplit
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut working = GroupStats::default();
    let mut non_working = GroupStats::default();

    for record in records {
        if record.working_day {
            working.add(record);
        } else {
            non_working.add(record);
        }
    }

    WorkdaySplit {
        working: working.finish(),
        non_working: non_working.finish(),
    }
}

/// Casual riders per weather condition; always one entry per category
pub(crate) fn weather_casual<'a, I>(records: I) -> Vec<WeatherCasual>
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut acc = WeatherAccumulator::default();
    for record in records {
        acc.add(record.weather, record.casual);
    }
    acc.into_entries()
}

/// Casual and registered riders per hour of day, hours 0..=23 ascending
pub(crate) fn hourly_totals<'a, I>(records: I) -> Vec<HourlyTotals>
where
    I: IntoIterator<Item = &'a HourlyRecord>,
{
    let mut hours: Vec<HourlyTotals> = (0..24u8)
        .map(|hour| HourlyTotals {
            hour,
            ..Default::default()
        })
        .collect();

    for record in records {
        // The loader rejects hours outside 0..=23
        let slot = &mut hours[usize::from(record.hour)];
        slot.casual += record.casual;
        slot.registered += record.registered;
    }

    hours
}

fn band_index(temp: f64) -> usize {
    let idx = (temp * TEMP_BANDS as f64).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(TEMP_BANDS - 1)
    }
}

/// Temperature against total rentals: raw points plus per-band means
pub(crate) fn temperature_series<'a, I>(records: I) -> TemperatureSeries
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut points = Vec::new();
    let mut groups: Vec<(GroupStats, GroupStats)> = vec![Default::default(); TEMP_BANDS];

    for record in records {
        points.push(TemperaturePoint {
            date: record.date,
            temp: record.temp,
            total: record.total,
            working_day: record.working_day,
        });
        let (working, non_working) = &mut groups[band_index(record.temp)];
        if record.working_day {
            working.add(record);
        } else {
            non_working.add(record);
        }
    }

    let bands = groups
        .into_iter()
        .enumerate()
        .map(|(i, (working, non_working))| TemperatureBand {
            lower: i as f64 / TEMP_BANDS as f64,
            upper: (i + 1) as f64 / TEMP_BANDS as f64,
            working: working.finish(),
            non_working: non_working.finish(),
        })
        .collect();

    TemperatureSeries { points, bands }
}
