//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::Config;
use crate::core::{RankBy, WeekStart};
use crate::summary::{DEFAULT_SUMMARY_URL, DEFAULT_TIMEOUT_SECS};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first (default)
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "sessionstats")]
#[command(about = "Network session usage by day, week and month", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Session JSON file (reads stdin when absent or "-")
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) file: Option<PathBuf>,

    /// Filter from date (YYYY-MM-DD, YYYYMMDD or DD-MM-YYYY)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Filter until date (YYYY-MM-DD, YYYYMMDD or DD-MM-YYYY)
    #[arg(short, long, global = true)]
    pub(crate) until: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true, conflicts_with = "csv")]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Sort order for results [default: desc]
    #[arg(short, long, global = true, value_enum)]
    pub(crate) order: Option<SortOrder>,

    /// Keep only the N highest-ranked periods
    #[arg(long, global = true, value_name = "N")]
    pub(crate) top: Option<usize>,

    /// Metric used by --top [default: total]
    #[arg(long, global = true, value_enum)]
    pub(crate) rank_by: Option<RankBy>,

    /// First day of the week [default: monday]
    #[arg(long, global = true, value_enum)]
    pub(crate) week_start: Option<WeekStart>,

    /// Color output mode [default: auto]
    #[arg(long, global = true, value_enum)]
    pub(crate) color: Option<ColorMode>,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Insight service endpoint for the summary command
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) summary_url: Option<String>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Request timeout for the insight service (config only)
    #[arg(skip)]
    pub(crate) summary_timeout_secs: Option<u64>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        self.no_color |= config.no_color;
        self.debug |= config.debug;

        self.order = self.order.or(config.order);
        self.color = self.color.or(config.color);
        self.week_start = self.week_start.or(config.week_start);
        self.rank_by = self.rank_by.or(config.rank_by);
        self.summary_timeout_secs = self.summary_timeout_secs.or(config.summary_timeout_secs);

        if self.summary_url.is_none() {
            self.summary_url = config.summary_url.clone();
        }
        if self.file.is_none() {
            self.file = config.file.clone();
        }

        self
    }

    pub(crate) fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub(crate) fn week_start(&self) -> WeekStart {
        self.week_start.unwrap_or_default()
    }

    pub(crate) fn rank_by(&self) -> RankBy {
        self.rank_by.unwrap_or_default()
    }

    pub(crate) fn summary_url(&self) -> &str {
        self.summary_url.as_deref().unwrap_or(DEFAULT_SUMMARY_URL)
    }

    pub(crate) fn summary_timeout(&self) -> Duration {
        Duration::from_secs(self.summary_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Input file, or `None` for stdin
    pub(crate) fn input_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|p| p.as_os_str() != "-")
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color.unwrap_or_default() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
