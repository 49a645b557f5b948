/// Standard date format used throughout the codebase: "2011-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default location of the daily dataset, relative to the working directory
pub(crate) const DEFAULT_DAY_FILE: &str = "data/day.csv";

/// Default location of the hourly dataset, relative to the working directory
pub(crate) const DEFAULT_HOUR_FILE: &str = "data/hour.csv";

/// Placeholder shown when a mean is undefined for an empty group
pub(crate) const NO_DATA: &str = "no data";

/// Number of equal-width bands the normalized [0, 1] temperature scale is split into
pub(crate) const TEMP_BANDS: usize = 10;
