use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;
use crate::error::AppError;

/// Parse a date given on the command line or in the config file
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let trimmed = s.trim();
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return Ok(d);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compact_form() {
        assert_eq!(
            parse_date("20110105").unwrap(),
            NaiveDate::from_ymd_opt(2011, 1, 5).unwrap()
        );
    }

    #[test]
    fn parse_dashed_form() {
        assert_eq!(
            parse_date("2012-12-31").unwrap(),
            NaiveDate::from_ymd_opt(2012, 12, 31).unwrap()
        );
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(parse_date(" 2012-01-01 ").is_ok());
    }

    #[test]
    fn parse_invalid_reports_input() {
        let err = parse_date("2012-13-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Invalid date "2012-13-01" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
        assert!(parse_date("yesterday").is_err());
    }
}
