//! Fixed-format parsers for login timestamps and session durations

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::consts::LOGIN_TIME_FORMAT;
use crate::error::ParseError;

/// Split `s` on `sep` into exactly `N` all-digit fields of the given widths.
fn digit_fields<const N: usize>(s: &str, sep: char, widths: [usize; N]) -> Option<[u32; N]> {
    let mut out = [0u32; N];
    let mut parts = s.split(sep);
    for (slot, width) in out.iter_mut().zip(widths) {
        let part = parts.next()?;
        if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Parse a "DD-MM-YYYY HH:MM:SS" login time into a naive local timestamp.
pub(crate) fn parse_login_time(s: &str) -> Result<NaiveDateTime, ParseError> {
    let format_err = || ParseError::LoginTimeFormat {
        input: s.to_string(),
    };
    let range_err = || ParseError::LoginTimeRange {
        input: s.to_string(),
    };

    let (date_part, time_part) = s.split_once(' ').ok_or_else(format_err)?;
    let [day, month, year] = digit_fields(date_part, '-', [2, 2, 4]).ok_or_else(format_err)?;
    let [hour, minute, second] = digit_fields(time_part, ':', [2, 2, 2]).ok_or_else(format_err)?;

    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(range_err)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(range_err)?;
    let dt = date.and_time(time);

    // The calendar must hand back exactly what was written
    let round_trips = dt.year() == year as i32
        && dt.month() == month
        && dt.day() == day
        && dt.hour() == hour
        && dt.minute() == minute
        && dt.second() == second;
    if !round_trips {
        return Err(range_err());
    }
    Ok(dt)
}

/// Serialize a timestamp in the same pattern `parse_login_time` accepts.
pub(crate) fn format_login_time(dt: &NaiveDateTime) -> String {
    dt.format(LOGIN_TIME_FORMAT).to_string()
}

/// Parse an "HH:MM:SS" session duration into whole seconds.
///
/// Hours are not capped at 23; minutes and seconds must be 00-59.
pub(crate) fn parse_duration(s: &str) -> Result<i64, ParseError> {
    let [hours, minutes, seconds] =
        digit_fields(s, ':', [2, 2, 2]).ok_or_else(|| ParseError::DurationFormat {
            input: s.to_string(),
        })?;
    if minutes > 59 || seconds > 59 {
        return Err(ParseError::DurationRange {
            input: s.to_string(),
        });
    }
    Ok(i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds))
}
