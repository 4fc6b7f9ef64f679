//! Core module - segmentation and period aggregation engine
//!
//! Pure, synchronous functions over in-memory sessions. Nothing here performs
//! I/O or keeps state between calls.

mod aggregator;
mod period;
mod segment;
mod types;

pub(crate) use aggregator::{
    aggregate_daily, aggregate_monthly, aggregate_weekly, filter_sessions,
    select_top, sort_sessions_desc,
};
pub(crate) use period::{Period, PeriodKey, WeekStart};
pub(crate) use types::{DateFilter, PeriodAggregate, RankBy, Session, UsageTotals};
