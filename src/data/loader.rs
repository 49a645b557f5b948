//! CSV loader for the daily and hourly tables
//!
//! One pass per file. Each row is coerced into a typed record; the first bad
//! cell aborts the load with an error naming the file, row and column.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};

use crate::consts::DATE_FORMAT;
use crate::core::{DailyRecord, Dataset, HourlyRecord, Weather};
use crate::error::DataFormatError;

/// A table row that can be built from one CSV record
pub(crate) trait TableRow: Sized {
    /// Columns that must be present in the header
    const COLUMNS: &'static [&'static str];

    fn from_cells(cells: &Cells<'_>) -> Result<Self, DataFormatError>;

    /// The row's `cnt`; the table-wide sum of these must fit in a `u64`
    fn total(&self) -> u64;
}

/// One CSV record together with enough context to report a bad cell
pub(crate) struct Cells<'a> {
    path: &'a Path,
    row: usize,
    index: &'a HashMap<&'static str, usize>,
    record: &'a csv::StringRecord,
}

impl Cells<'_> {
    fn raw(&self, column: &'static str) -> &str {
        // Header presence is checked before any record is read
        self.index
            .get(column)
            .and_then(|&i| self.record.get(i))
            .unwrap_or("")
    }

    fn invalid(&self, column: &'static str, expected: &'static str) -> DataFormatError {
        DataFormatError::InvalidValue {
            path: self.path.to_path_buf(),
            row: self.row,
            column,
            value: self.raw(column).to_string(),
            expected,
        }
    }

    pub(crate) fn date(&self, column: &'static str) -> Result<NaiveDate, DataFormatError> {
        parse_day(self.raw(column)).ok_or_else(|| self.invalid(column, "date YYYY-MM-DD"))
    }

    pub(crate) fn count(&self, column: &'static str) -> Result<u64, DataFormatError> {
        self.raw(column)
            .parse::<u64>()
            .map_err(|_| self.invalid(column, "non-negative integer"))
    }

    pub(crate) fn flag(&self, column: &'static str) -> Result<bool, DataFormatError> {
        match self.raw(column) {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(self.invalid(column, "0 or 1")),
        }
    }

    pub(crate) fn weather(&self, column: &'static str) -> Result<Weather, DataFormatError> {
        self.raw(column)
            .parse::<u8>()
            .ok()
            .and_then(Weather::from_code)
            .ok_or_else(|| self.invalid(column, "weather code 1-4"))
    }

    pub(crate) fn hour(&self, column: &'static str) -> Result<u8, DataFormatError> {
        self.raw(column)
            .parse::<u8>()
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| self.invalid(column, "hour 0-23"))
    }

    pub(crate) fn unit_float(&self, column: &'static str) -> Result<f64, DataFormatError> {
        self.raw(column)
            .parse::<f64>()
            .ok()
            .filter(|v| (0.0..=1.0).contains(v))
            .ok_or_else(|| self.invalid(column, "number in [0, 1]"))
    }

    /// Read casual/registered/cnt and enforce cnt == casual + registered
    pub(crate) fn counts(&self) -> Result<(u64, u64, u64), DataFormatError> {
        let casual = self.count("casual")?;
        let registered = self.count("registered")?;
        let total = self.count("cnt")?;
        if casual.checked_add(registered) != Some(total) {
            return Err(DataFormatError::InconsistentTotal {
                path: self.path.to_path_buf(),
                row: self.row,
                casual,
                registered,
                total,
            });
        }
        Ok((casual, registered, total))
    }
}

/// Timestamp layouts accepted in date columns; the time of day is dropped
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date, or a full timestamp truncated to its date
fn parse_day(s: &str) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(day);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

impl TableRow for DailyRecord {
    const COLUMNS: &'static [&'static str] = &[
        "dteday",
        "workingday",
        "weathersit",
        "temp",
        "casual",
        "registered",
        "cnt",
    ];

    fn from_cells(cells: &Cells<'_>) -> Result<Self, DataFormatError> {
        let (casual, registered, total) = cells.counts()?;
        Ok(DailyRecord {
            date: cells.date("dteday")?,
            working_day: cells.flag("workingday")?,
            weather: cells.weather("weathersit")?,
            temp: cells.unit_float("temp")?,
            casual,
            registered,
            total,
        })
    }

    fn total(&self) -> u64 {
        self.total
    }
}

impl TableRow for HourlyRecord {
    const COLUMNS: &'static [&'static str] = &["dteday", "hr", "casual", "registered", "cnt"];

    fn from_cells(cells: &Cells<'_>) -> Result<Self, DataFormatError> {
        let (casual, registered, total) = cells.counts()?;
        Ok(HourlyRecord {
            date: cells.date("dteday")?,
            hour: cells.hour("hr")?,
            casual,
            registered,
            total,
        })
    }

    fn total(&self) -> u64 {
        self.total
    }
}

/// Parse a whole table from any reader; `path` is only used in error messages
pub(crate) fn read_table<T: TableRow, R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<T>, DataFormatError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| record_error(path, 0, &e))?
        .clone();

    let mut index = HashMap::new();
    for &column in T::COLUMNS {
        let pos = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataFormatError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
        index.insert(column, pos);
    }

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut row = 0;
    // Bounds every grouped sum computed later: casual and registered never exceed cnt
    let mut table_total: u64 = 0;
    loop {
        row += 1;
        match csv_reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(record_error(path, row, &e)),
        }
        let cells = Cells {
            path,
            row,
            index: &index,
            record: &record,
        };
        let parsed = T::from_cells(&cells)?;
        table_total = table_total.checked_add(parsed.total()).ok_or_else(|| {
            DataFormatError::TotalOverflow {
                path: path.to_path_buf(),
                row,
                max: u64::MAX,
            }
        })?;
        rows.push(parsed);
    }

    Ok(rows)
}

fn record_error(path: &Path, row: usize, e: &csv::Error) -> DataFormatError {
    if let csv::ErrorKind::Io(io) = e.kind() {
        return DataFormatError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }
    DataFormatError::Record {
        path: path.to_path_buf(),
        row,
        message: e.to_string(),
    }
}

/// Open and parse one table file
pub(crate) fn load_table<T: TableRow>(path: &Path) -> Result<Vec<T>, DataFormatError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|source| DataFormatError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = read_table(file, path)?;
    log::debug!(
        "Loaded {} rows from {} ({:.2}ms)",
        rows.len(),
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(rows)
}

/// Paths of the two input tables
#[derive(Debug, Clone)]
pub(crate) struct DataFiles {
    pub(crate) day: PathBuf,
    pub(crate) hour: PathBuf,
}

/// Load both tables into the shared dataset context
pub(crate) fn load_dataset(files: &DataFiles) -> Result<Dataset, DataFormatError> {
    let daily = load_table::<DailyRecord>(&files.day)?;
    let hourly = load_table::<HourlyRecord>(&files.hour)?;
    Ok(Dataset::new(daily, hourly))
}
