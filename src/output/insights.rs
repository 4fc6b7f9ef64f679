use std::fmt::Write;

use crate::summary::SessionInsights;

const NOT_IDENTIFIED: &str = "Not identified";

fn or_placeholder(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NOT_IDENTIFIED
    } else {
        trimmed
    }
}

pub(super) fn render_insights(insights: &SessionInsights, use_color: bool) -> String {
    let sections = [
        ("Session level", insights.session_level_summary.as_str()),
        ("Daily level", insights.daily_level_summary.as_str()),
        ("Weekly level", insights.weekly_level_summary.as_str()),
        ("Monthly level", insights.monthly_level_summary.as_str()),
        ("Peak hours", insights.peak_hours.as_str()),
        ("Quiet hours", insights.quiet_hours.as_str()),
    ];

    let mut out = String::from("\n  Usage Insights\n\n");
    for (title, text) in sections {
        if use_color {
            let _ = writeln!(out, "  \x1b[1;36m{title}\x1b[0m");
        } else {
            let _ = writeln!(out, "  {title}");
        }
        let _ = writeln!(out, "    {}\n", or_placeholder(text));
    }
    out
}

pub(crate) fn print_insights(insights: &SessionInsights, use_color: bool) {
    print!("{}", render_insights(insights, use_color));
}

pub(crate) fn output_insights_json(insights: &SessionInsights) -> String {
    format!("{:#}", serde_json::json!(insights))
}
