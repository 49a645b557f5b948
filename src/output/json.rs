//! JSON renderers. Empty-group means are emitted as `null`.

use serde_json::{Value, json};

use crate::cli::SortOrder;
use crate::core::{
    DailyRecord, Dashboard, DatasetInfo, DateRange, GroupStats, HourlyTotals, TemperatureSeries,
    WeatherCasual, WorkdaySplit,
};
use crate::output::format::{mean_json_value, ordered};

fn pretty(value: &Value) -> String {
    // Serializing a Value cannot fail
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn range_value(range: &DateRange) -> Value {
    json!({
        "start": range.start,
        "end": range.end,
    })
}

fn group_value(group: &GroupStats) -> Value {
    json!({
        "days": group.days,
        "total": group.sum,
        "casual": group.casual,
        "registered": group.registered,
        "mean": mean_json_value(group.mean),
    })
}

fn workday_value(split: &WorkdaySplit) -> Value {
    json!({
        "working_day": group_value(&split.working),
        "non_working_day": group_value(&split.non_working),
    })
}

fn weather_value(weather: &[WeatherCasual]) -> Value {
    Value::Array(
        weather
            .iter()
            .map(|w| {
                json!({
                    "code": w.weather.code(),
                    "weather": w.weather.label(),
                    "casual": w.casual,
                })
            })
            .collect(),
    )
}

fn hourly_value(hourly: &[HourlyTotals], order: SortOrder) -> Value {
    Value::Array(
        ordered(hourly.to_vec(), order)
            .iter()
            .map(|h| {
                json!({
                    "hour": h.hour,
                    "casual": h.casual,
                    "registered": h.registered,
                    "total": h.casual + h.registered,
                })
            })
            .collect(),
    )
}

pub(crate) fn output_summary_json(dashboard: &Dashboard, order: SortOrder) -> String {
    pretty(&json!({
        "range": range_value(&dashboard.range),
        "filtered_days": dashboard.filtered_days,
        "workday": workday_value(&dashboard.workday),
        "weather_casual": weather_value(&dashboard.weather),
        "hourly": hourly_value(&dashboard.hourly, order),
    }))
}

pub(crate) fn output_workday_json(range: &DateRange, split: &WorkdaySplit) -> String {
    let mut value = workday_value(split);
    value["range"] = range_value(range);
    pretty(&value)
}

pub(crate) fn output_weather_json(weather: &[WeatherCasual]) -> String {
    pretty(&weather_value(weather))
}

pub(crate) fn output_hourly_json(hourly: &[HourlyTotals], order: SortOrder) -> String {
    pretty(&hourly_value(hourly, order))
}

pub(crate) fn output_temperature_json(series: &TemperatureSeries) -> String {
    let bands: Vec<Value> = series
        .bands
        .iter()
        .map(|b| {
            json!({
                "lower": b.lower,
                "upper": b.upper,
                "working_day": group_value(&b.working),
                "non_working_day": group_value(&b.non_working),
            })
        })
        .collect();
    pretty(&json!({
        "points": series.points,
        "bands": bands,
    }))
}

pub(crate) fn output_days_json(days: &[&DailyRecord], order: SortOrder) -> String {
    let rows: Vec<Value> = ordered(days.to_vec(), order)
        .iter()
        .map(|d| {
            json!({
                "date": d.date,
                "working_day": d.working_day,
                "weather": d.weather.label(),
                "temp": d.temp,
                "casual": d.casual,
                "registered": d.registered,
                "total": d.total,
            })
        })
        .collect();
    pretty(&Value::Array(rows))
}

pub(crate) fn output_range_json(info: &DatasetInfo) -> String {
    pretty(&json!(info))
}
