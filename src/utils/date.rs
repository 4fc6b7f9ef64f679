use chrono::NaiveDate;

use crate::consts::{DATE_FORMAT, DISPLAY_DATE_FORMAT};
use crate::error::AppError;

/// Parse a `--since`/`--until` value.
///
/// Accepts YYYY-MM-DD, YYYYMMDD and the DD-MM-YYYY form used by login times.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    [DATE_FORMAT, DISPLAY_DATE_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidDate {
            input: s.to_string(),
        })
}
