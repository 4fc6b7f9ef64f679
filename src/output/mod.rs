mod csv;
mod format;
mod insights;
mod json;
mod session;
mod table;

pub(crate) use csv::{output_period_csv, output_session_csv};
pub(crate) use insights::{output_insights_json, print_insights};
pub(crate) use json::{output_period_json, output_session_json};
pub(crate) use session::{SessionTableOptions, print_session_table};
pub(crate) use table::{PeriodTableOptions, SummaryOptions, print_period_table};
