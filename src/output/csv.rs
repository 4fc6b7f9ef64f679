use std::fmt::Write;

use crate::cli::SortOrder;
use crate::consts::DATE_FORMAT;
use crate::core::{Period, PeriodAggregate, Session};
use crate::output::format::{csv_escape, in_order};
use crate::source::format_login_time;

pub(crate) fn output_period_csv(
    aggregates: &[PeriodAggregate],
    period: Period,
    order: SortOrder,
) -> String {
    let label = period.label();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{label},period_start,period_end,active_seconds,inactive_seconds,download_mb,upload_mb,total_mb,segments"
    );
    for a in in_order(aggregates, order) {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{:.6},{:.6},{:.6},{}",
            csv_escape(&a.label()),
            a.period_start.format(DATE_FORMAT),
            a.period_end.format(DATE_FORMAT),
            a.total_duration_seconds(),
            a.inactive_seconds(),
            a.total_download_mb(),
            a.total_upload_mb(),
            a.total_mb(),
            a.segment_count(),
        );
    }
    out
}

pub(crate) fn output_session_csv(sessions: &[Session], order: SortOrder) -> String {
    let mut out = String::from("login_time,logout_time,duration_seconds,download_mb,upload_mb\n");
    for s in in_order(sessions, order) {
        let _ = writeln!(
            out,
            "{},{},{},{:.6},{:.6}",
            format_login_time(&s.login_time),
            format_login_time(&s.end_time()),
            s.effective_duration(),
            s.download_mb,
            s.upload_mb,
        );
    }
    out
}
