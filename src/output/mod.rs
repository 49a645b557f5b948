mod csv;
mod format;
mod json;
mod table;

pub(crate) use self::csv::{
    output_days_csv, output_hourly_csv, output_range_csv, output_summary_csv,
    output_temperature_csv, output_weather_csv, output_workday_csv,
};
pub(crate) use format::{NumberFormat, TableOptions};
pub(crate) use json::{
    output_days_json, output_hourly_json, output_range_json, output_summary_json,
    output_temperature_json, output_weather_json, output_workday_json,
};
pub(crate) use table::{
    print_days_table, print_hourly_table, print_range_table, print_summary,
    print_temperature_table, print_weather_table, print_workday_table,
};
