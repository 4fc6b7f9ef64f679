mod args;
mod commands;

pub(crate) use args::{Cli, ColorMode, SortOrder};
pub(crate) use commands::{Commands, resolve_command};
