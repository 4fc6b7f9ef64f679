//! JSON session loader
//!
//! Reads an array of `{loginTime, sessionTime, download, upload}` records.
//! Every record is validated and every problem is collected, so a single
//! run reports all of the bad records at once.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::Session;
use crate::error::{InvalidRecords, LoadError, RecordIssue, ShapeError};
use crate::source::parser::{parse_duration, parse_login_time};

const LOGIN_TIME: &str = "loginTime";
const SESSION_TIME: &str = "sessionTime";
const DOWNLOAD: &str = "download";
const UPLOAD: &str = "upload";

pub(crate) fn load_sessions_from_path(path: &Path) -> Result<Vec<Session>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "read session file");
    load_sessions_from_str(&raw)
}

pub(crate) fn load_sessions_from_str(raw: &str) -> Result<Vec<Session>, LoadError> {
    let start = Instant::now();
    let root: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = root else {
        return Err(LoadError::Shape(ShapeError::NotArray));
    };

    let mut sessions = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match parse_record(index, item) {
            Ok(session) => sessions.push(session),
            Err(mut found) => issues.append(&mut found),
        }
    }

    if !issues.is_empty() {
        debug!(records = items.len(), issues = issues.len(), "rejected session batch");
        return Err(LoadError::Invalid(InvalidRecords(issues)));
    }

    debug!(
        sessions = sessions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "loaded sessions"
    );
    Ok(sessions)
}

/// Validate one record, returning every issue it has.
fn parse_record(index: usize, item: &Value) -> Result<Session, Vec<RecordIssue>> {
    let Some(obj) = item.as_object() else {
        return Err(vec![RecordIssue::Shape(ShapeError::NotObject { index })]);
    };

    let mut issues = Vec::new();

    let login_time = string_field(obj, index, LOGIN_TIME)
        .map_err(RecordIssue::Shape)
        .and_then(|s| {
            parse_login_time(s).map_err(|source| RecordIssue::Parse {
                index,
                field: LOGIN_TIME,
                source,
            })
        })
        .map_err(|e| issues.push(e))
        .ok();

    let duration_seconds = string_field(obj, index, SESSION_TIME)
        .map_err(RecordIssue::Shape)
        .and_then(|s| {
            parse_duration(s).map_err(|source| RecordIssue::Parse {
                index,
                field: SESSION_TIME,
                source,
            })
        })
        .map_err(|e| issues.push(e))
        .ok();

    let download_mb = amount_field(obj, index, DOWNLOAD)
        .map_err(|e| issues.push(RecordIssue::Shape(e)))
        .ok();
    let upload_mb = amount_field(obj, index, UPLOAD)
        .map_err(|e| issues.push(RecordIssue::Shape(e)))
        .ok();

    match (login_time, duration_seconds, download_mb, upload_mb) {
        (Some(login_time), Some(duration_seconds), Some(download_mb), Some(upload_mb))
            if issues.is_empty() =>
        {
            Ok(Session {
                login_time,
                duration_seconds,
                download_mb,
                upload_mb,
            })
        }
        _ => Err(issues),
    }
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ShapeError> {
    match obj.get(field) {
        None => Err(ShapeError::MissingField { index, field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ShapeError::WrongType {
            index,
            field,
            expected: "a string",
        }),
    }
}

fn amount_field(obj: &Map<String, Value>, index: usize, field: &'static str) -> Result<f64, ShapeError> {
    let value = match obj.get(field) {
        None => return Err(ShapeError::MissingField { index, field }),
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => None,
    };
    let Some(value) = value else {
        return Err(ShapeError::WrongType {
            index,
            field,
            expected: "a number",
        });
    };
    if !value.is_finite() || value < 0.0 {
        return Err(ShapeError::Negative { index, field });
    }
    Ok(value)
}
