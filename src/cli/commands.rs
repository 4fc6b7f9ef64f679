//! CLI subcommand definitions

use clap::Subcommand;

use crate::core::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Commands {
    /// Show usage per calendar day (default)
    Daily,
    /// Show usage per week
    Weekly,
    /// Show usage per calendar month
    Monthly,
    /// List individual sessions
    Session,
    /// Ask the insight service to summarize usage
    Summary,
}

impl Commands {
    /// The aggregation period, for the commands that aggregate
    pub(crate) fn period(self) -> Option<Period> {
        match self {
            Commands::Daily => Some(Period::Day),
            Commands::Weekly => Some(Period::Week),
            Commands::Monthly => Some(Period::Month),
            Commands::Session | Commands::Summary => None,
        }
    }
}

/// The command to run, defaulting to daily
pub(crate) fn resolve_command(command: Option<Commands>) -> Commands {
    command.unwrap_or(Commands::Daily)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_is_daily() {
        assert_eq!(resolve_command(None), Commands::Daily);
        assert_eq!(resolve_command(Some(Commands::Summary)), Commands::Summary);
    }

    #[test]
    fn periods_by_command() {
        assert_eq!(Commands::Daily.period(), Some(Period::Day));
        assert_eq!(Commands::Weekly.period(), Some(Period::Week));
        assert_eq!(Commands::Monthly.period(), Some(Period::Month));
        assert_eq!(Commands::Session.period(), None);
    }
}
