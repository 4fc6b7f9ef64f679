use serde_json::{Value, json};

use crate::cli::SortOrder;
use crate::consts::DATE_FORMAT;
use crate::core::{PeriodAggregate, PeriodKey, Session};
use crate::output::format::in_order;
use crate::source::format_login_time;

fn period_json(aggregate: &PeriodAggregate) -> Value {
    let mut obj = json!({
        (aggregate.period.label()): aggregate.label(),
        "period_start": aggregate.period_start.format(DATE_FORMAT).to_string(),
        "period_end": aggregate.period_end.format(DATE_FORMAT).to_string(),
        "active_seconds": aggregate.total_duration_seconds(),
        "inactive_seconds": aggregate.inactive_seconds(),
        "download_mb": aggregate.total_download_mb(),
        "upload_mb": aggregate.total_upload_mb(),
        "total_mb": aggregate.total_mb(),
        "segments": aggregate.segment_count(),
    });
    if let PeriodKey::Week { year, week } = aggregate.key {
        obj["iso_year"] = json!(year);
        obj["iso_week"] = json!(week);
    }
    obj
}

/// Pretty-printed JSON array of period aggregates.
pub(crate) fn output_period_json(aggregates: &[PeriodAggregate], order: SortOrder) -> String {
    let rows: Vec<Value> = in_order(aggregates, order)
        .into_iter()
        .map(period_json)
        .collect();
    format!("{:#}", Value::Array(rows))
}

pub(crate) fn output_session_json(sessions: &[Session], order: SortOrder) -> String {
    let rows: Vec<Value> = in_order(sessions, order)
        .into_iter()
        .map(|s| {
            json!({
                "login_time": format_login_time(&s.login_time),
                "logout_time": format_login_time(&s.end_time()),
                "duration_seconds": s.effective_duration(),
                "download_mb": s.download_mb,
                "upload_mb": s.upload_mb,
            })
        })
        .collect();
    format!("{:#}", Value::Array(rows))
}
