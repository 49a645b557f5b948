use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("--json and --csv cannot be used together")]
    ConflictingFormats,

    #[error("Failed to write CSV output: {0}")]
    CsvOutput(String),

    #[error("{0}")]
    Data(#[from] DataFormatError),

    #[error("{0}")]
    Jq(#[from] JqError),
}

/// Malformed input data. Always fatal: nothing downstream can recover from it.
#[derive(Debug, Error)]
pub(crate) enum DataFormatError {
    #[error("{path}: cannot read file: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}: missing required column \"{column}\"")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path}: row {row}: malformed record: {message}")]
    Record {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("{path}: row {row}, column \"{column}\": invalid value \"{value}\" ({expected})")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error(
        "{path}: row {row}, column \"cnt\": total {total} does not equal casual {casual} + registered {registered}"
    )]
    InconsistentTotal {
        path: PathBuf,
        row: usize,
        casual: u64,
        registered: u64,
        total: u64,
    },

    #[error("{path}: row {row}, column \"cnt\": running table total exceeds {max}")]
    TotalOverflow { path: PathBuf, row: usize, max: u64 },
}

#[derive(Debug, Error)]
pub(crate) enum JqError {
    #[error("jq not found. Please install jq to use --jq option.")]
    NotFound,

    #[error("Failed to run jq: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to write to jq stdin: {0}")]
    Stdin(std::io::Error),

    #[error("Failed to wait for jq: {0}")]
    Wait(std::io::Error),

    #[error("Invalid UTF-8 from jq: {0}")]
    Utf8(std::string::FromUtf8Error),

    #[error("jq error: {0}")]
    Filter(String),
}
