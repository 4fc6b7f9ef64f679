use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::cli::{Cli, Commands, resolve_command};
use crate::core::{
    DateFilter, Period, PeriodAggregate, Session, aggregate_daily, aggregate_monthly,
    aggregate_weekly, filter_sessions, select_top, sort_sessions_desc,
};
use crate::error::{AppError, LoadError};
use crate::output::{
    PeriodTableOptions, SessionTableOptions, SummaryOptions, output_insights_json,
    output_period_csv, output_period_json, output_session_csv, output_session_json,
    print_insights, print_period_table, print_session_table,
};
use crate::source::{load_sessions_from_path, load_sessions_from_str};
use crate::summary::{SummaryClient, describe_usage};
use crate::utils::parse_date;

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) start: Instant,
}

impl CommandContext<'_> {
    fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

fn read_sessions(cli: &Cli) -> Result<Vec<Session>, LoadError> {
    match cli.input_path() {
        Some(path) => load_sessions_from_path(path),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| LoadError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            debug!(bytes = raw.len(), "read sessions from stdin");
            load_sessions_from_str(&raw)
        }
    }
}

fn date_filter(cli: &Cli) -> Result<DateFilter, AppError> {
    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let until = cli.until.as_deref().map(parse_date).transpose()?;
    Ok(DateFilter::new(since, until))
}

fn aggregate(sessions: &[Session], period: Period, ctx: &CommandContext<'_>) -> Vec<PeriodAggregate> {
    let aggregates = match period {
        Period::Day => aggregate_daily(sessions),
        Period::Week => aggregate_weekly(sessions, ctx.cli.week_start()),
        Period::Month => aggregate_monthly(sessions),
    };
    match ctx.cli.top {
        Some(n) => select_top(aggregates, n, ctx.cli.rank_by()),
        None => aggregates,
    }
}

fn handle_period(period: Period, sessions: &[Session], ctx: &CommandContext<'_>) {
    let cli = ctx.cli;
    let aggregates = aggregate(sessions, period, ctx);

    if cli.json {
        println!("{}", output_period_json(&aggregates, cli.sort_order()));
    } else if cli.csv {
        print!("{}", output_period_csv(&aggregates, period, cli.sort_order()));
    } else if aggregates.is_empty() {
        println!("No session data found for the specified date range.");
    } else {
        print_period_table(
            &aggregates,
            period,
            SummaryOptions {
                sessions: sessions.len(),
                elapsed_ms: Some(ctx.elapsed_ms()),
            },
            PeriodTableOptions {
                order: cli.sort_order(),
                use_color: cli.use_color(),
            },
        );
    }
}

fn handle_session(sessions: Vec<Session>, ctx: &CommandContext<'_>) {
    let cli = ctx.cli;
    let sessions = sort_sessions_desc(sessions);

    if cli.json {
        println!("{}", output_session_json(&sessions, cli.sort_order()));
    } else if cli.csv {
        print!("{}", output_session_csv(&sessions, cli.sort_order()));
    } else if sessions.is_empty() {
        println!("No session data found for the specified date range.");
    } else {
        print_session_table(
            &sessions,
            SessionTableOptions {
                order: cli.sort_order(),
                use_color: cli.use_color(),
            },
        );
    }
}

fn handle_summary(sessions: &[Session], ctx: &CommandContext<'_>) -> Result<(), AppError> {
    if sessions.is_empty() {
        println!("No session data to summarize.");
        return Ok(());
    }

    let cli = ctx.cli;
    let client = SummaryClient::new(cli.summary_url(), cli.summary_timeout());
    let insights = client.request(&describe_usage(sessions))?;

    if cli.json {
        println!("{}", output_insights_json(&insights));
    } else {
        print_insights(&insights, cli.use_color());
    }
    Ok(())
}

/// Load, filter and render according to the parsed command line.
///
/// Every input error is raised before anything is written to stdout.
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let ctx = CommandContext {
        cli,
        start: Instant::now(),
    };
    let filter = date_filter(cli)?;
    let sessions = read_sessions(cli)?;
    let total = sessions.len();

    let sessions = if filter.is_unbounded() {
        sessions
    } else {
        filter_sessions(sessions, &filter)
    };
    info!(loaded = total, kept = sessions.len(), "sessions ready");

    let command = resolve_command(cli.command);
    match command.period() {
        Some(period) => handle_period(period, &sessions, &ctx),
        None if command == Commands::Session => handle_session(sessions, &ctx),
        None => handle_summary(&sessions, &ctx)?,
    }
    Ok(())
}
