//! Core data types shared by the segmenter, the aggregators and the renderers

use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::Deserialize;

use crate::consts::SECONDS_PER_DAY;
use crate::core::period::{Period, PeriodBounds, PeriodKey};
use crate::core::segment::Segment;

/// One continuous network session, as loaded from the input file
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Session {
    /// Naive local login time; no timezone conversion is applied
    pub(crate) login_time: NaiveDateTime,
    pub(crate) duration_seconds: i64,
    pub(crate) download_mb: f64,
    pub(crate) upload_mb: f64,
}

impl Session {
    /// Negative durations are treated as zero.
    pub(crate) fn effective_duration(&self) -> i64 {
        self.duration_seconds.max(0)
    }

    pub(crate) fn end_time(&self) -> NaiveDateTime {
        self.login_time + Duration::seconds(self.effective_duration())
    }

    pub(crate) fn to_totals(&self) -> UsageTotals {
        UsageTotals {
            duration_seconds: self.effective_duration(),
            download_mb: self.download_mb,
            upload_mb: self.upload_mb,
            count: 1,
        }
    }
}

/// Running duration and transfer totals
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct UsageTotals {
    pub(crate) duration_seconds: i64,
    pub(crate) download_mb: f64,
    pub(crate) upload_mb: f64,
    /// Number of contributing segments (or sessions, for the session view)
    pub(crate) count: usize,
}

impl UsageTotals {
    pub(crate) fn add(&mut self, other: &UsageTotals) {
        self.duration_seconds += other.duration_seconds;
        self.download_mb += other.download_mb;
        self.upload_mb += other.upload_mb;
        self.count += other.count;
    }

    pub(crate) fn total_mb(&self) -> f64 {
        self.download_mb + self.upload_mb
    }
}

/// Accumulated totals for one calendar day, week or month
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PeriodAggregate {
    pub(crate) period: Period,
    pub(crate) key: PeriodKey,
    /// First calendar day of the period
    pub(crate) period_start: NaiveDate,
    /// Last calendar day of the period (inclusive)
    pub(crate) period_end: NaiveDate,
    pub(crate) totals: UsageTotals,
}

impl PeriodAggregate {
    pub(crate) fn new(period: Period, key: PeriodKey, bounds: PeriodBounds) -> Self {
        PeriodAggregate {
            period,
            key,
            period_start: bounds.start,
            period_end: bounds.end,
            totals: UsageTotals::default(),
        }
    }

    pub(crate) fn add_segment(&mut self, segment: &Segment<'_>) {
        self.totals.add(&segment.to_totals());
    }

    pub(crate) fn label(&self) -> String {
        self.key.label()
    }

    /// Calendar length of the period in seconds
    pub(crate) fn period_seconds(&self) -> i64 {
        ((self.period_end - self.period_start).num_days() + 1) * SECONDS_PER_DAY
    }

    pub(crate) fn inactive_seconds(&self) -> i64 {
        (self.period_seconds() - self.totals.duration_seconds).max(0)
    }

    pub(crate) fn total_duration_seconds(&self) -> i64 {
        self.totals.duration_seconds
    }

    pub(crate) fn total_download_mb(&self) -> f64 {
        self.totals.download_mb
    }

    pub(crate) fn total_upload_mb(&self) -> f64 {
        self.totals.upload_mb
    }

    pub(crate) fn total_mb(&self) -> f64 {
        self.totals.total_mb()
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.totals.count
    }
}

/// Metric used by the top-N selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RankBy {
    /// Download plus upload (default)
    #[default]
    Total,
    /// Downloaded MB
    Download,
    /// Uploaded MB
    Upload,
    /// Active seconds
    Duration,
}

impl RankBy {
    pub(crate) fn value(self, totals: &UsageTotals) -> f64 {
        match self {
            RankBy::Total => totals.total_mb(),
            RankBy::Download => totals.download_mb,
            RankBy::Upload => totals.upload_mb,
            RankBy::Duration => totals.duration_seconds as f64,
        }
    }
}

/// Date filter for queries
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<NaiveDate>,
    pub(crate) until: Option<NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }

    /// `since` counts from 00:00:00 and `until` runs through 23:59:59, both inclusive.
    pub(crate) fn contains_time(&self, t: NaiveDateTime) -> bool {
        self.contains(t.date())
    }
}
