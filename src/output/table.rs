use comfy_table::Table;

use crate::consts::DATE_FORMAT;
use crate::core::{
    DailyRecord, Dashboard, DatasetInfo, DateRange, GroupStats, HourlyTotals, TemperatureSeries,
    WeatherCasual, WorkdaySplit,
};
use crate::output::format::{
    TableOptions, create_styled_table, format_mean, format_number, format_share,
    ordered, right_cell, styled_cell,
};

fn print_titled(title: &str, table: &Table) {
    println!("\n  {title}\n");
    println!("{table}");
}

fn group_cells(label: &str, g: &GroupStats, opts: &TableOptions) -> Vec<comfy_table::Cell> {
    let nf = opts.number_format;
    vec![
        styled_cell(label, None, false),
        right_cell(&format_number(g.days, nf), None, false),
        right_cell(&format_number(g.sum, nf), None, false),
        right_cell(&format_mean(g.mean, nf), opts.highlight(), false),
        right_cell(&format_number(g.casual, nf), None, false),
        right_cell(&format_number(g.registered, nf), None, false),
    ]
}

pub(crate) fn build_workday_table(split: &WorkdaySplit, opts: &TableOptions) -> Table {
    let mut table = create_styled_table(
        &["Group", "Days", "Total", "Average", "Casual", "Registered"],
        opts.use_color,
    );
    table.add_row(group_cells("Working day", &split.working, opts));
    table.add_row(group_cells("Non-working day", &split.non_working, opts));
    table
}

pub(crate) fn build_weather_table(weather: &[WeatherCasual], opts: &TableOptions) -> Table {
    let nf = opts.number_format;
    let total: u64 = weather.iter().map(|w| w.casual).sum();
    let mut table = create_styled_table(&["Weather", "Casual", "Share"], opts.use_color);
    for w in weather {
        table.add_row(vec![
            styled_cell(w.weather.label(), None, false),
            right_cell(&format_number(w.casual, nf), None, false),
            right_cell(&format_share(w.casual, total, nf), None, false),
        ]);
    }
    let accent = opts.accent();
    table.add_row(vec![
        styled_cell("TOTAL", accent, true),
        right_cell(&format_number(total, nf), accent, true),
        right_cell(&format_share(total, total, nf), accent, true),
    ]);
    table
}

pub(crate) fn build_hourly_table(hourly: &[HourlyTotals], opts: &TableOptions) -> Table {
    let nf = opts.number_format;
    let mut table = create_styled_table(
        &["Hour", "Casual", "Registered", "Total", "Casual %"],
        opts.use_color,
    );
    let (mut casual, mut registered) = (0u64, 0u64);
    for h in ordered(hourly.to_vec(), opts.order) {
        let total = h.casual + h.registered;
        casual += h.casual;
        registered += h.registered;
        table.add_row(vec![
            styled_cell(&format!("{:02}:00", h.hour), None, false),
            right_cell(&format_number(h.casual, nf), None, false),
            right_cell(&format_number(h.registered, nf), None, false),
            right_cell(&format_number(total, nf), None, false),
            right_cell(&format_share(h.casual, total, nf), None, false),
        ]);
    }
    let accent = opts.accent();
    table.add_row(vec![
        styled_cell("TOTAL", accent, true),
        right_cell(&format_number(casual, nf), accent, true),
        right_cell(&format_number(registered, nf), accent, true),
        right_cell(&format_number(casual + registered, nf), accent, true),
        right_cell(&format_share(casual, casual + registered, nf), accent, true),
    ]);
    table
}

pub(crate) fn build_temperature_table(series: &TemperatureSeries, opts: &TableOptions) -> Table {
    let nf = opts.number_format;
    let mut table = create_styled_table(
        &["Temp (norm.)", "Working days", "Avg working", "Other days", "Avg other"],
        opts.use_color,
    );
    for band in &series.bands {
        table.add_row(vec![
            styled_cell(
                &format!("{:.1} - {:.1}", band.lower, band.upper),
                None,
                false,
            ),
            right_cell(&format_number(band.working.days, nf), None, false),
            right_cell(&format_mean(band.working.mean, nf), opts.highlight(), false),
            right_cell(&format_number(band.non_working.days, nf), None, false),
            right_cell(&format_mean(band.non_working.mean, nf), opts.highlight(), false),
        ]);
    }
    table
}

pub(crate) fn build_days_table(days: &[&DailyRecord], opts: &TableOptions) -> Table {
    let nf = opts.number_format;
    let mut table = create_styled_table(
        &["Date", "Working", "Weather", "Temp", "Casual", "Registered", "Total"],
        opts.use_color,
    );
    let (mut casual, mut registered, mut total) = (0u64, 0u64, 0u64);
    for d in ordered(days.to_vec(), opts.order) {
        casual += d.casual;
        registered += d.registered;
        total += d.total;
        table.add_row(vec![
            styled_cell(&d.date.format(DATE_FORMAT).to_string(), None, false),
            styled_cell(if d.working_day { "yes" } else { "no" }, None, false),
            styled_cell(d.weather.label(), None, false),
            right_cell(&format!("{:.3}", d.temp), None, false),
            right_cell(&format_number(d.casual, nf), None, false),
            right_cell(&format_number(d.registered, nf), None, false),
            right_cell(&format_number(d.total, nf), None, false),
        ]);
    }
    let accent = opts.accent();
    table.add_row(vec![
        styled_cell("TOTAL", accent, true),
        styled_cell("", None, false),
        styled_cell("", None, false),
        styled_cell("", None, false),
        right_cell(&format_number(casual, nf), accent, true),
        right_cell(&format_number(registered, nf), accent, true),
        right_cell(&format_number(total, nf), accent, true),
    ]);
    table
}

fn range_line(range: &DateRange, days: usize, opts: &TableOptions) -> String {
    format!(
        "{} → {} ({} days selected)",
        range.start.format(DATE_FORMAT),
        range.end.format(DATE_FORMAT),
        format_number(days as u64, opts.number_format)
    )
}

pub(crate) fn print_workday_table(range: &DateRange, split: &WorkdaySplit, opts: &TableOptions) {
    let days = (split.working.days + split.non_working.days) as usize;
    print_titled("Rentals: Working vs. Non-working Days", &build_workday_table(split, opts));
    println!("\n  {}", range_line(range, days, opts));
    print_workday_captions(split, opts);
    println!();
}

pub(crate) fn print_weather_table(weather: &[WeatherCasual], opts: &TableOptions) {
    print_titled("Casual Rentals by Weather Condition", &build_weather_table(weather, opts));
}

pub(crate) fn print_hourly_table(hourly: &[HourlyTotals], opts: &TableOptions) {
    print_titled("Casual vs. Registered Rentals by Hour", &build_hourly_table(hourly, opts));
}

pub(crate) fn print_temperature_table(series: &TemperatureSeries, opts: &TableOptions) {
    print_titled(
        "Average Rentals by Temperature: Working vs. Non-working Days",
        &build_temperature_table(series, opts),
    );
    println!("\n  {} days plotted\n", format_number(series.points.len() as u64, opts.number_format));
}

pub(crate) fn print_days_table(range: &DateRange, days: &[&DailyRecord], opts: &TableOptions) {
    print_titled("Daily Rentals", &build_days_table(days, opts));
    println!("\n  {}\n", range_line(range, days.len(), opts));
}

pub(crate) fn print_summary(dashboard: &Dashboard, opts: &TableOptions) {
    println!("\n  Bike Sharing Dashboard");
    println!(
        "  {}",
        range_line(&dashboard.range, dashboard.filtered_days, opts)
    );
    print_titled(
        "Rentals: Working vs. Non-working Days",
        &build_workday_table(&dashboard.workday, opts),
    );
    println!();
    print_workday_captions(&dashboard.workday, opts);
    print_weather_table(&dashboard.weather, opts);
    print_hourly_table(&dashboard.hourly, opts);
    println!();
}

pub(crate) fn print_range_table(info: &DatasetInfo, opts: &TableOptions) {
    let nf = opts.number_format;
    let day = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let mut table = create_styled_table(&["First day", "Last day", "Daily rows", "Hourly rows"], opts.use_color);
    table.add_row(vec![
        styled_cell(&day(info.first_day), None, false),
        styled_cell(&day(info.last_day), None, false),
        right_cell(&format_number(info.daily_rows as u64, nf), None, false),
        right_cell(&format_number(info.hourly_rows as u64, nf), None, false),
    ]);
    print_titled("Loaded Data", &table);
    println!();
}

/// One-line metric caption, e.g. "Working day: total 1,234, average 617.00"
fn describe_group(label: &str, g: &GroupStats, opts: &TableOptions) -> String {
    let nf = opts.number_format;
    format!(
        "{label}: total {}, average {}",
        format_number(g.sum, nf),
        format_mean(g.mean, nf)
    )
}

fn print_workday_captions(split: &WorkdaySplit, opts: &TableOptions) {
    println!("  {}", describe_group("Working day", &split.working, opts));
    println!("  {}", describe_group("Non-working day", &split.non_working, opts));
}
