use crate::cli::SortOrder;
use crate::consts::DATE_FORMAT;
use crate::core::{
    DailyRecord, Dashboard, DatasetInfo, GroupStats, HourlyTotals, TemperatureSeries, WeatherCasual,
    WorkdaySplit,
};
use crate::error::AppError;
use crate::output::format::ordered;

type CsvWriter = ::csv::Writer<Vec<u8>>;

fn writer() -> CsvWriter {
    ::csv::Writer::from_writer(Vec::new())
}

fn write_row<I, T>(wtr: &mut CsvWriter, row: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    wtr.write_record(row)
        .map_err(|e| AppError::CsvOutput(e.to_string()))
}

fn finish(wtr: CsvWriter) -> Result<String, AppError> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::CsvOutput(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::CsvOutput(e.to_string()))
}

fn mean_field(mean: Option<f64>) -> String {
    mean.map(|m| format!("{m:.6}")).unwrap_or_default()
}

fn group_row(label: &str, g: &GroupStats) -> [String; 6] {
    [
        label.to_string(),
        g.days.to_string(),
        g.sum.to_string(),
        g.casual.to_string(),
        g.registered.to_string(),
        mean_field(g.mean),
    ]
}

pub(crate) fn output_workday_csv(split: &WorkdaySplit) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(&mut wtr, ["group", "days", "total", "casual", "registered", "mean"])?;
    write_row(&mut wtr, group_row("working_day", &split.working))?;
    write_row(&mut wtr, group_row("non_working_day", &split.non_working))?;
    finish(wtr)
}

pub(crate) fn output_weather_csv(weather: &[WeatherCasual]) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(&mut wtr, ["code", "weather", "casual"])?;
    for w in weather {
        write_row(
            &mut wtr,
            [
                w.weather.code().to_string(),
                w.weather.label().to_string(),
                w.casual.to_string(),
            ],
        )?;
    }
    finish(wtr)
}

pub(crate) fn output_hourly_csv(hourly: &[HourlyTotals], order: SortOrder) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(&mut wtr, ["hour", "casual", "registered", "total"])?;
    for h in ordered(hourly.to_vec(), order) {
        write_row(
            &mut wtr,
            [
                h.hour.to_string(),
                h.casual.to_string(),
                h.registered.to_string(),
                (h.casual + h.registered).to_string(),
            ],
        )?;
    }
    finish(wtr)
}

/// Scatter data: one row per day
pub(crate) fn output_temperature_csv(series: &TemperatureSeries) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(&mut wtr, ["date", "temp", "cnt", "workingday"])?;
    for p in &series.points {
        write_row(
            &mut wtr,
            [
                p.date.format(DATE_FORMAT).to_string(),
                p.temp.to_string(),
                p.total.to_string(),
                u8::from(p.working_day).to_string(),
            ],
        )?;
    }
    finish(wtr)
}

pub(crate) fn output_days_csv(days: &[&DailyRecord], order: SortOrder) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(
        &mut wtr,
        ["dteday", "workingday", "weathersit", "temp", "casual", "registered", "cnt"],
    )?;
    for d in ordered(days.to_vec(), order) {
        write_row(
            &mut wtr,
            [
                d.date.format(DATE_FORMAT).to_string(),
                u8::from(d.working_day).to_string(),
                d.weather.code().to_string(),
                d.temp.to_string(),
                d.casual.to_string(),
                d.registered.to_string(),
                d.total.to_string(),
            ],
        )?;
    }
    finish(wtr)
}

/// Long format: one metric per row so every panel fits a single table
pub(crate) fn output_summary_csv(dashboard: &Dashboard, order: SortOrder) -> Result<String, AppError> {
    let mut wtr = writer();
    write_row(&mut wtr, ["panel", "key", "metric", "value"])?;

    let range = &dashboard.range;
    for (metric, value) in [
        ("start", range.start.format(DATE_FORMAT).to_string()),
        ("end", range.end.format(DATE_FORMAT).to_string()),
        ("days", dashboard.filtered_days.to_string()),
    ] {
        write_row(&mut wtr, ["range", "", metric, value.as_str()])?;
    }

    for (key, group) in [
        ("working_day", &dashboard.workday.working),
        ("non_working_day", &dashboard.workday.non_working),
    ] {
        for (metric, value) in [
            ("days", group.days.to_string()),
            ("total", group.sum.to_string()),
            ("mean", mean_field(group.mean)),
        ] {
            write_row(&mut wtr, ["workday", key, metric, value.as_str()])?;
        }
    }

    for w in &dashboard.weather {
        write_row(
            &mut wtr,
            ["weather", w.weather.label(), "casual", w.casual.to_string().as_str()],
        )?;
    }

    for h in ordered(dashboard.hourly.clone(), order) {
        let hour = h.hour.to_string();
        write_row(&mut wtr, ["hourly", hour.as_str(), "casual", h.casual.to_string().as_str()])?;
        write_row(
            &mut wtr,
            ["hourly", hour.as_str(), "registered", h.registered.to_string().as_str()],
        )?;
    }

    finish(wtr)
}

pub(crate) fn output_range_csv(info: &DatasetInfo) -> Result<String, AppError> {
    let day = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };
    let mut wtr = writer();
    write_row(&mut wtr, ["first_day", "last_day", "daily_rows", "hourly_rows"])?;
    write_row(
        &mut wtr,
        [
            day(info.first_day),
            day(info.last_day),
            info.daily_rows.to_string(),
            info.hourly_rows.to_string(),
        ],
    )?;
    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DateRange, Weather};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn workday_csv_leaves_empty_mean_blank() {
        let split = WorkdaySplit {
            working: GroupStats {
                days: 1,
                sum: 100,
                casual: 40,
                registered: 60,
                mean: Some(100.0),
            },
            non_working: GroupStats::default(),
        };
        let out = output_workday_csv(&split).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "group,days,total,casual,registered,mean");
        assert_eq!(lines[1], "working_day,1,100,40,60,100.000000");
        assert_eq!(lines[2], "non_working_day,0,0,0,0,");
    }

    #[test]
    fn weather_csv_quotes_nothing_needlessly() {
        let weather = vec![WeatherCasual {
            weather: Weather::LightSnowOrRain,
            casual: 12,
        }];
        let out = output_weather_csv(&weather).unwrap();
        assert_eq!(out, "code,weather,casual\n3,Light Snow/Rain,12\n");
    }

    #[test]
    fn days_csv_matches_input_schema() {
        let rec = DailyRecord {
            date: d(2011, 1, 3),
            working_day: true,
            weather: Weather::Clear,
            temp: 0.25,
            casual: 120,
            registered: 1229,
            total: 1349,
        };
        let out = output_days_csv(&[&rec], SortOrder::Asc).unwrap();
        assert_eq!(
            out,
            "dteday,workingday,weathersit,temp,casual,registered,cnt\n2011-01-03,1,1,0.25,120,1229,1349\n"
        );
    }

    #[test]
    fn summary_csv_long_format() {
        let dashboard = Dashboard {
            range: DateRange::new(d(2021, 1, 1), d(2021, 1, 2)),
            filtered_days: 2,
            workday: WorkdaySplit::default(),
            weather: Weather::ALL
                .iter()
                .map(|&weather| WeatherCasual { weather, casual: 0 })
                .collect(),
            hourly: (0..24u8)
                .map(|hour| HourlyTotals {
                    hour,
                    ..Default::default()
                })
                .collect(),
        };
        let out = output_summary_csv(&dashboard, SortOrder::Asc).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "panel,key,metric,value");
        assert_eq!(lines[1], "range,,start,2021-01-01");
        // header + 3 range + 6 workday + 4 weather + 48 hourly
        assert_eq!(lines.len(), 1 + 3 + 6 + 4 + 48);
        assert!(lines.contains(&"workday,non_working_day,mean,"));
        assert!(lines.contains(&"hourly,23,registered,0"));
    }
}
