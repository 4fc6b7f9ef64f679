use comfy_table::{Cell, Color, Table};

use crate::cli::SortOrder;
use crate::core::{Session, UsageTotals};
use crate::output::format::{
    create_styled_table, format_data_size, format_duration, header_cell, in_order, right_cell,
    styled_cell,
};
use crate::source::format_login_time;

#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionTableOptions {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
}

pub(super) fn render_session_table(sessions: &[Session], options: SessionTableOptions) -> Table {
    let c = options.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Login", c),
        header_cell("Logout", c),
        header_cell("Duration", c),
        header_cell("Download", c),
        header_cell("Upload", c),
    ]);

    let data_color = if c { Some(Color::Green) } else { None };
    let mut totals = UsageTotals::default();

    for session in in_order(sessions, options.order) {
        totals.add(&session.to_totals());
        table.add_row(vec![
            Cell::new(format_login_time(&session.login_time)),
            Cell::new(format_login_time(&session.end_time())),
            right_cell(&format_duration(session.effective_duration()), None, false),
            right_cell(&format_data_size(session.download_mb), data_color, false),
            right_cell(&format_data_size(session.upload_mb), data_color, false),
        ]);
    }

    let total_color = if c { Some(Color::Yellow) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", total_color, true),
        Cell::new(format!("{} sessions", totals.count)),
        right_cell(&format_duration(totals.duration_seconds), total_color, true),
        right_cell(&format_data_size(totals.download_mb), total_color, true),
        right_cell(&format_data_size(totals.upload_mb), total_color, true),
    ]);
    table
}

pub(crate) fn print_session_table(sessions: &[Session], options: SessionTableOptions) {
    println!("\n  Network Sessions\n");
    println!("{}", render_session_table(sessions, options));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort_sessions_desc;
    use crate::source::load_sessions_from_str;

    #[test]
    fn session_rows_show_login_logout_and_totals() {
        let sessions = sort_sessions_desc(
            load_sessions_from_str(
                r#"[
                    {"loginTime": "31-07-2024 23:00:00", "sessionTime": "02:00:00", "download": 100, "upload": 50},
                    {"loginTime": "01-08-2024 10:00:00", "sessionTime": "25:30:00", "download": 1.5, "upload": 0.25}
                ]"#,
            )
            .unwrap(),
        );
        let out = render_session_table(
            &sessions,
            SessionTableOptions {
                order: SortOrder::Desc,
                use_color: false,
            },
        )
        .to_string();

        assert!(out.contains("31-07-2024 23:00:00"));
        assert!(out.contains("01-08-2024 01:00:00"));
        assert!(out.contains("02-08-2024 11:30:00"));
        assert!(out.contains("1d 01:30:00"));
        assert!(out.contains("2 sessions"));
        assert!(out.contains("101.50 MB"));
        assert!(out.find("01-08-2024 10:00:00").unwrap() < out.find("31-07-2024 23:00:00").unwrap());
    }
}
