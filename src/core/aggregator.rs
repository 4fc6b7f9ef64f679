//! Period aggregation
//!
//! Folds session segments into day, week and month totals. Every aggregator
//! segments at its own period boundary, so a session that crosses midnight,
//! a week start or a month start is prorated across both sides.

use std::collections::HashMap;

use tracing::debug;

use crate::core::period::{Period, PeriodKey, WeekStart};
use crate::core::segment::split_session;
use crate::core::types::{DateFilter, PeriodAggregate, RankBy, Session};

/// Aggregate sessions into `period` totals, most recent period first.
pub(crate) fn aggregate_by_period(
    sessions: &[Session],
    period: Period,
    week_start: WeekStart,
) -> Vec<PeriodAggregate> {
    let mut periods: HashMap<PeriodKey, PeriodAggregate> = HashMap::new();
    let mut segment_count = 0usize;

    for session in sessions {
        for segment in split_session(session, period, week_start) {
            let date = segment.start.date();
            let key = period.key_for(date, week_start);
            let aggregate = periods
                .entry(key)
                .or_insert_with(|| PeriodAggregate::new(period, key, period.bounds(date, week_start)));
            aggregate.add_segment(&segment);
            segment_count += 1;
        }
    }

    debug!(
        period = period.label(),
        sessions = sessions.len(),
        segments = segment_count,
        periods = periods.len(),
        "aggregated sessions"
    );

    let mut aggregates: Vec<PeriodAggregate> = periods.into_values().collect();
    aggregates.sort_by(|a, b| b.period_start.cmp(&a.period_start));
    aggregates
}

pub(crate) fn aggregate_daily(sessions: &[Session]) -> Vec<PeriodAggregate> {
    aggregate_by_period(sessions, Period::Day, WeekStart::default())
}

pub(crate) fn aggregate_weekly(sessions: &[Session], week_start: WeekStart) -> Vec<PeriodAggregate> {
    aggregate_by_period(sessions, Period::Week, week_start)
}

pub(crate) fn aggregate_monthly(sessions: &[Session]) -> Vec<PeriodAggregate> {
    aggregate_by_period(sessions, Period::Month, WeekStart::default())
}

/// Keep whole sessions whose login time falls inside the filter range.
pub(crate) fn filter_sessions(sessions: Vec<Session>, filter: &DateFilter) -> Vec<Session> {
    sessions
        .into_iter()
        .filter(|s| filter.contains_time(s.login_time))
        .collect()
}

/// Session view ordering: most recent login first (consumes sessions to avoid cloning)
pub(crate) fn sort_sessions_desc(mut sessions: Vec<Session>) -> Vec<Session> {
    sessions.sort_by(|a, b| b.login_time.cmp(&a.login_time));
    sessions
}

/// Keep the `n` aggregates ranking highest by `rank_by`, in their original order.
///
/// Ties favor the earlier (more recent) entry.
pub(crate) fn select_top(
    aggregates: Vec<PeriodAggregate>,
    n: usize,
    rank_by: RankBy,
) -> Vec<PeriodAggregate> {
    if aggregates.len() <= n {
        return aggregates;
    }

    let mut ranked: Vec<usize> = (0..aggregates.len()).collect();
    ranked.sort_by(|&a, &b| {
        let va = rank_by.value(&aggregates[a].totals);
        let vb = rank_by.value(&aggregates[b].totals);
        vb.total_cmp(&va).then(a.cmp(&b))
    });

    let mut keep = vec![false; aggregates.len()];
    for &i in ranked.iter().take(n) {
        keep[i] = true;
    }

    aggregates
        .into_iter()
        .zip(keep)
        .filter_map(|(aggregate, kept)| kept.then_some(aggregate))
        .collect()
}
