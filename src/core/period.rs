//! Calendar period identities and boundaries
//!
//! Maps a point in time to the day, week or month it belongs to, the calendar
//! bounds of that period, and the instant the next period starts.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde::Deserialize;

use crate::consts::DATE_FORMAT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) enum Period {
    #[default]
    Day,
    Week,
    Month,
}

/// First day of the week
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum WeekStart {
    /// ISO weeks (default)
    #[default]
    Monday,
    /// Sunday through Saturday
    Sunday,
}

impl WeekStart {
    /// The first day of the week containing `date`.
    pub(crate) fn week_start_date(self, date: NaiveDate) -> NaiveDate {
        let offset = match self {
            WeekStart::Monday => date.weekday().num_days_from_monday(),
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        };
        date - Duration::days(i64::from(offset))
    }
}

/// Identity of a calendar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum PeriodKey {
    Day(NaiveDate),
    /// ISO week-numbering year and week
    Week { year: i32, week: u32 },
    /// Calendar year and 1-based month
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    pub(crate) fn label(&self) -> String {
        match self {
            PeriodKey::Day(date) => date.format(DATE_FORMAT).to_string(),
            PeriodKey::Week { year, week } => format!("{year}-W{week:02}"),
            PeriodKey::Month { year, month } => format!("{year}-{month:02}"),
        }
    }
}

/// Inclusive first and last calendar day of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PeriodBounds {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl PeriodBounds {
    /// Midnight at which the following period begins
    pub(crate) fn next_start(&self) -> NaiveDateTime {
        (self.end + Duration::days(1)).and_time(NaiveTime::MIN)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

impl Period {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Period::Day => "date",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub(crate) fn key_for(self, date: NaiveDate, week_start: WeekStart) -> PeriodKey {
        match self {
            Period::Day => PeriodKey::Day(date),
            Period::Week => {
                // A Sunday-start week shares Monday..Saturday with the ISO week after its Sunday
                let anchor = match week_start {
                    WeekStart::Monday => date,
                    WeekStart::Sunday => week_start.week_start_date(date) + Duration::days(1),
                };
                let iso = anchor.iso_week();
                PeriodKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Period::Month => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    pub(crate) fn bounds(self, date: NaiveDate, week_start: WeekStart) -> PeriodBounds {
        match self {
            Period::Day => PeriodBounds {
                start: date,
                end: date,
            },
            Period::Week => {
                let start = week_start.week_start_date(date);
                PeriodBounds {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Period::Month => PeriodBounds {
                start: first_of_month(date),
                end: first_of_next_month(date) - Duration::days(1),
            },
        }
    }

    /// Start of the period following the one that contains `t`; always later than `t`.
    pub(crate) fn next_boundary(self, t: NaiveDateTime, week_start: WeekStart) -> NaiveDateTime {
        self.bounds(t.date(), week_start).next_start()
    }
}
