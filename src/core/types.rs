//! Core data types for the bike-sharing tables
//!
//! Records are produced once by the loader and never mutated afterwards.

use chrono::NaiveDate;
use serde::Serialize;

/// Weather condition tiers, coded 1..=4 in the source files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Weather {
    Clear,
    Mist,
    LightSnowOrRain,
    HeavyRain,
}

impl Weather {
    /// All categories in severity order
    pub(crate) const ALL: [Weather; 4] = [
        Weather::Clear,
        Weather::Mist,
        Weather::LightSnowOrRain,
        Weather::HeavyRain,
    ];

    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Weather::Clear),
            2 => Some(Weather::Mist),
            3 => Some(Weather::LightSnowOrRain),
            4 => Some(Weather::HeavyRain),
            _ => None,
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Weather::Clear => 1,
            Weather::Mist => 2,
            Weather::LightSnowOrRain => 3,
            Weather::HeavyRain => 4,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Mist => "Mist",
            Weather::LightSnowOrRain => "Light Snow/Rain",
            Weather::HeavyRain => "Heavy Rain",
        }
    }

    fn index(self) -> usize {
        usize::from(self.code() - 1)
    }
}

/// One row of the daily table
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DailyRecord {
    pub(crate) date: NaiveDate,
    pub(crate) working_day: bool,
    pub(crate) weather: Weather,
    /// Normalized temperature in [0, 1]
    pub(crate) temp: f64,
    pub(crate) casual: u64,
    pub(crate) registered: u64,
    pub(crate) total: u64,
}

/// One row of the hourly table
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HourlyRecord {
    pub(crate) date: NaiveDate,
    pub(crate) hour: u8,
    pub(crate) casual: u64,
    pub(crate) registered: u64,
    pub(crate) total: u64,
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl DateRange {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A reversed range contains nothing
    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub(crate) fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

/// Sum and mean of total rentals for one side of the working-day split
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GroupStats {
    pub(crate) days: u64,
    pub(crate) sum: u64,
    pub(crate) casual: u64,
    pub(crate) registered: u64,
    /// `None` when the group has no rows
    pub(crate) mean: Option<f64>,
}

impl GroupStats {
    pub(crate) fn add(&mut self, record: &DailyRecord) {
        self.days += 1;
        self.sum += record.total;
        self.casual += record.casual;
        self.registered += record.registered;
    }

    pub(crate) fn finish(mut self) -> Self {
        self.mean = (self.days > 0).then(|| self.sum as f64 / self.days as f64);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct WorkdaySplit {
    pub(crate) working: GroupStats,
    pub(crate) non_working: GroupStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeatherCasual {
    pub(crate) weather: Weather,
    pub(crate) casual: u64,
}

/// Fixed-size accumulator keyed by weather category
#[derive(Debug, Default)]
pub(crate) struct WeatherAccumulator([u64; 4]);

impl WeatherAccumulator {
    pub(crate) fn add(&mut self, weather: Weather, casual: u64) {
        self.0[weather.index()] += casual;
    }

    pub(crate) fn into_entries(self) -> Vec<WeatherCasual> {
        Weather::ALL
            .iter()
            .map(|&weather| WeatherCasual {
                weather,
                casual: self.0[weather.index()],
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct HourlyTotals {
    pub(crate) hour: u8,
    pub(crate) casual: u64,
    pub(crate) registered: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct TemperaturePoint {
    pub(crate) date: NaiveDate,
    pub(crate) temp: f64,
    pub(crate) total: u64,
    pub(crate) working_day: bool,
}

/// Mean total rentals within one temperature band, per working-day group
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TemperatureBand {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) working: GroupStats,
    pub(crate) non_working: GroupStats,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TemperatureSeries {
    pub(crate) points: Vec<TemperaturePoint>,
    pub(crate) bands: Vec<TemperatureBand>,
}

/// Everything the dashboard shows for one date range
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Dashboard {
    pub(crate) range: DateRange,
    pub(crate) filtered_days: usize,
    pub(crate) workday: WorkdaySplit,
    pub(crate) weather: Vec<WeatherCasual>,
    pub(crate) hourly: Vec<HourlyTotals>,
}

/// Span and size of the loaded tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct DatasetInfo {
    pub(crate) first_day: Option<NaiveDate>,
    pub(crate) last_day: Option<NaiveDate>,
    pub(crate) daily_rows: usize,
    pub(crate) hourly_rows: usize,
}
