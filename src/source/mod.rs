//! Session input: fixed-format field parsers and the JSON record loader

mod loader;
mod parser;

pub(crate) use loader::{load_sessions_from_path, load_sessions_from_str};
pub(crate) use parser::{format_login_time, parse_duration, parse_login_time};
