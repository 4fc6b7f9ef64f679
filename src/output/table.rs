use comfy_table::{Cell, Color, Table};

use crate::cli::SortOrder;
use crate::consts::DISPLAY_DATE_FORMAT;
use crate::core::{Period, PeriodAggregate, UsageTotals};
use crate::output::format::{
    create_styled_table, format_data_size, format_duration, header_cell, in_order, right_cell,
    styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodTableOptions {
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
}

/// Counts shown beneath a table
#[derive(Debug, Clone, Copy)]
pub(crate) struct SummaryOptions {
    pub(crate) sessions: usize,
    pub(crate) elapsed_ms: Option<f64>,
}

fn print_summary_line(summary: SummaryOptions, use_color: bool) {
    let stats_text = format!(
        "{} session{} analyzed",
        summary.sessions,
        if summary.sessions == 1 { "" } else { "s" }
    );

    match summary.elapsed_ms {
        Some(ms) if use_color => println!("\n  {stats_text} | \x1b[36m{ms:.0}ms\x1b[0m\n"),
        Some(ms) => println!("\n  {stats_text} | {ms:.0}ms\n"),
        None => println!("\n  {stats_text}\n"),
    }
}

struct PeriodConfig {
    label: &'static str,
    title: &'static str,
}

fn period_config(period: Period) -> PeriodConfig {
    match period {
        Period::Day => PeriodConfig {
            label: "Date",
            title: "Daily Network Usage",
        },
        Period::Week => PeriodConfig {
            label: "Week",
            title: "Weekly Network Usage",
        },
        Period::Month => PeriodConfig {
            label: "Month",
            title: "Monthly Network Usage",
        },
    }
}

fn range_text(aggregate: &PeriodAggregate) -> String {
    let start = aggregate.period_start.format(DISPLAY_DATE_FORMAT);
    if aggregate.period_start == aggregate.period_end {
        start.to_string()
    } else {
        format!("{start} - {}", aggregate.period_end.format(DISPLAY_DATE_FORMAT))
    }
}

pub(super) fn render_period_table(
    aggregates: &[PeriodAggregate],
    period: Period,
    options: PeriodTableOptions,
) -> Table {
    let cfg = period_config(period);
    let c = options.use_color;

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(cfg.label, c),
        header_cell("Range", c),
        header_cell("Active", c),
        header_cell("Inactive", c),
        header_cell("Download", c),
        header_cell("Upload", c),
        header_cell("Segments", c),
    ]);

    let data_color = if c { Some(Color::Green) } else { None };
    let mut totals = UsageTotals::default();
    let mut inactive = 0;

    for aggregate in in_order(aggregates, options.order) {
        totals.add(&aggregate.totals);
        inactive += aggregate.inactive_seconds();
        table.add_row(vec![
            Cell::new(aggregate.label()),
            Cell::new(range_text(aggregate)),
            right_cell(&format_duration(aggregate.total_duration_seconds()), None, false),
            right_cell(&format_duration(aggregate.inactive_seconds()), None, false),
            right_cell(&format_data_size(aggregate.total_download_mb()), data_color, false),
            right_cell(&format_data_size(aggregate.total_upload_mb()), data_color, false),
            right_cell(&aggregate.segment_count().to_string(), None, false),
        ]);
    }

    let total_color = if c { Some(Color::Yellow) } else { None };
    table.add_row(vec![
        styled_cell("TOTAL", total_color, true),
        Cell::new(""),
        right_cell(&format_duration(totals.duration_seconds), total_color, true),
        right_cell(&format_duration(inactive), total_color, true),
        right_cell(&format_data_size(totals.download_mb), total_color, true),
        right_cell(&format_data_size(totals.upload_mb), total_color, true),
        right_cell(&totals.count.to_string(), total_color, true),
    ]);
    table
}

pub(crate) fn print_period_table(
    aggregates: &[PeriodAggregate],
    period: Period,
    summary: SummaryOptions,
    options: PeriodTableOptions,
) {
    let table = render_period_table(aggregates, period, options);
    println!("\n  {}\n", period_config(period).title);
    println!("{table}");
    print_summary_line(summary, options.use_color);
}
