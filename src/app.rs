use crate::cli::{Cli, Commands, OutputFormat, parse_command};
use crate::core::{Dataset, DateRange};
use crate::data::load_dataset;
use crate::error::AppError;
use crate::output::{
    NumberFormat, TableOptions, output_days_csv, output_days_json, output_hourly_csv,
    output_hourly_json, output_range_csv, output_range_json, output_summary_csv,
    output_summary_json, output_temperature_csv, output_temperature_json, output_weather_csv,
    output_weather_json, output_workday_csv, output_workday_json, print_days_table,
    print_hourly_table, print_range_table, print_summary, print_temperature_table,
    print_weather_table, print_workday_table,
};
use crate::utils::{filter_json, parse_date};

/// Print JSON output, optionally filtering through jq
fn print_json(json: &str, jq_filter: Option<&str>) -> Result<(), AppError> {
    match jq_filter {
        Some(filter) => print!("{}", filter_json(json, filter)?),
        None => println!("{json}"),
    }
    Ok(())
}

pub(crate) struct CommandContext<'a> {
    pub(crate) dataset: &'a Dataset,
    pub(crate) format: OutputFormat,
    pub(crate) table: TableOptions,
    pub(crate) jq_filter: Option<&'a str>,
}

impl CommandContext<'_> {
    fn emit(
        &self,
        json: impl FnOnce() -> String,
        csv: impl FnOnce() -> Result<String, AppError>,
        table: impl FnOnce(&TableOptions),
    ) -> Result<(), AppError> {
        match self.format {
            OutputFormat::Json => print_json(&json(), self.jq_filter),
            OutputFormat::Csv => {
                print!("{}", csv()?);
                Ok(())
            }
            OutputFormat::Table => {
                table(&self.table);
                Ok(())
            }
        }
    }
}

fn handle_summary(range: DateRange, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let dashboard = ctx.dataset.dashboard(range);
    let order = ctx.table.order;
    ctx.emit(
        || output_summary_json(&dashboard, order),
        || output_summary_csv(&dashboard, order),
        |opts| print_summary(&dashboard, opts),
    )
}

fn handle_workday(range: DateRange, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let split = ctx.dataset.workday(&range);
    ctx.emit(
        || output_workday_json(&range, &split),
        || output_workday_csv(&split),
        |opts| print_workday_table(&range, &split, opts),
    )
}

fn handle_days(range: DateRange, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let days = ctx.dataset.filtered(&range);
    let order = ctx.table.order;
    ctx.emit(
        || output_days_json(&days, order),
        || output_days_csv(&days, order),
        |opts| print_days_table(&range, &days, opts),
    )
}

fn handle_weather(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let weather = ctx.dataset.weather();
    ctx.emit(
        || output_weather_json(&weather),
        || output_weather_csv(&weather),
        |opts| print_weather_table(&weather, opts),
    )
}

fn handle_hourly(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let hourly = ctx.dataset.hourly_totals();
    let order = ctx.table.order;
    ctx.emit(
        || output_hourly_json(&hourly, order),
        || output_hourly_csv(&hourly, order),
        |opts| print_hourly_table(&hourly, opts),
    )
}

fn handle_temperature(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let series = ctx.dataset.temperature();
    ctx.emit(
        || output_temperature_json(&series),
        || output_temperature_csv(&series),
        |opts| print_temperature_table(&series, opts),
    )
}

fn handle_range(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let info = ctx.dataset.info();
    ctx.emit(
        || output_range_json(&info),
        || output_range_csv(&info),
        |opts| print_range_table(&info, opts),
    )
}

/// Load both tables once, then render the requested view
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let format = cli.output_format()?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let until = cli.until.as_deref().map(parse_date).transpose()?;
    let command = parse_command(cli.command);

    if !command.uses_range() && (since.is_some() || until.is_some()) {
        log::warn!("--since/--until have no effect on this command; it covers the whole dataset");
    }
    if cli.jq.is_some() && format != OutputFormat::Json {
        log::warn!("--jq only applies to JSON output; pass --json to use it");
    }

    let dataset = load_dataset(&cli.data_files())?;
    log::debug!(
        "dataset ready: {} daily rows, {} hourly rows",
        dataset.daily().len(),
        dataset.hourly().len()
    );

    let ctx = CommandContext {
        dataset: &dataset,
        format,
        table: TableOptions {
            use_color: cli.use_color(),
            number_format,
            order: cli.order,
        },
        jq_filter: cli.jq.as_deref(),
    };

    if command.uses_range() {
        let Some(range) = dataset.resolve_range(since, until) else {
            println!("No daily data found.");
            return Ok(());
        };
        log::debug!("selected range {}..={}", range.start, range.end);
        return match command {
            Commands::Workday => handle_workday(range, &ctx),
            Commands::Days => handle_days(range, &ctx),
            _ => handle_summary(range, &ctx),
        };
    }

    match command {
        Commands::Weather => handle_weather(&ctx),
        Commands::Hourly => handle_hourly(&ctx),
        Commands::Temperature => handle_temperature(&ctx),
        _ => handle_range(&ctx),
    }
}
