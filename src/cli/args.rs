//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigSortOrder};
use crate::consts::{DEFAULT_DAY_FILE, DEFAULT_HOUR_FILE};
use crate::data::DataFiles;
use crate::error::AppError;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Earliest first (default)
    #[default]
    Asc,
    /// Latest first
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "bikestats")]
#[command(about = "Bike-sharing usage statistics from daily and hourly CSV data", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Daily dataset (CSV with dteday, workingday, weathersit, temp, casual, registered, cnt)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) day_file: Option<PathBuf>,

    /// Hourly dataset (CSV with dteday, hr, casual, registered, cnt)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) hour_file: Option<PathBuf>,

    /// Config file (default: ~/.config/bikestats/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Filter from date, inclusive (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Filter until date, inclusive (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Sort order for hourly and per-day rows
    #[arg(short, long, global = true, value_enum, default_value = "asc")]
    pub(crate) order: SortOrder,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging (load timings, row counts)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Filter JSON output with jq expression (requires jq installed)
    #[arg(long, global = true, value_name = "FILTER")]
    pub(crate) jq: Option<String>,

    /// Locale for number formatting (e.g., "en", "zh", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // Boolean flags: config only applies if CLI left them off
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        // Enum values: config only applies if CLI is at its default
        if self.order == SortOrder::Asc && config.order == Some(ConfigSortOrder::Desc) {
            self.order = SortOrder::Desc;
        }
        if self.color == ColorMode::Auto {
            match config.color {
                Some(ConfigColorMode::Always) => self.color = ColorMode::Always,
                Some(ConfigColorMode::Never) => self.color = ColorMode::Never,
                Some(ConfigColorMode::Auto) | None => {}
            }
        }

        if self.day_file.is_none() {
            self.day_file = config.day_file.clone();
        }
        if self.hour_file.is_none() {
            self.hour_file = config.hour_file.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn output_format(&self) -> Result<OutputFormat, AppError> {
        match (self.json, self.csv) {
            (true, true) => Err(AppError::ConflictingFormats),
            (true, false) => Ok(OutputFormat::Json),
            (false, true) => Ok(OutputFormat::Csv),
            (false, false) => Ok(OutputFormat::Table),
        }
    }

    pub(crate) fn data_files(&self) -> DataFiles {
        DataFiles {
            day: self
                .day_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DAY_FILE)),
            hour: self
                .hour_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HOUR_FILE)),
        }
    }
}
