/// Standard date format used for keys and JSON output: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Login timestamp format of the input records: "31-07-2024 23:00:00"
pub(crate) const LOGIN_TIME_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Display format for calendar dates in tables: "31-07-2024"
pub(crate) const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

pub(crate) const MB_PER_GB: f64 = 1024.0;
