//! Usage-insight requests
//!
//! Turns a batch of sessions into a plain-text usage description and posts it
//! to an insight service. The service's analysis is opaque to this crate; the
//! response is decoded and handed to the renderer as-is.

use std::fmt::Write;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::Session;
use crate::error::SummaryError;
use crate::source::format_login_time;

pub(crate) const DEFAULT_SUMMARY_URL: &str = "http://localhost:8080/api/analyzeSessionInsights";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Insights returned by the service; absent fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct SessionInsights {
    pub(crate) session_level_summary: String,
    pub(crate) daily_level_summary: String,
    pub(crate) weekly_level_summary: String,
    pub(crate) monthly_level_summary: String,
    pub(crate) peak_hours: String,
    pub(crate) quiet_hours: String,
}

#[derive(Debug, Deserialize)]
struct InsightsEnvelope {
    #[serde(default)]
    data: SessionInsights,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightsRequest<'a> {
    session_data: &'a str,
}

/// Hours are not wrapped into days here.
fn clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// One line per session, oldest first.
pub(crate) fn describe_usage(sessions: &[Session]) -> String {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by_key(|s| s.login_time);

    let mut out = String::new();
    for s in ordered {
        let _ = writeln!(
            out,
            "{}, duration {}, download {:.2} MB, upload {:.2} MB",
            format_login_time(&s.login_time),
            clock(s.effective_duration()),
            s.download_mb,
            s.upload_mb
        );
    }
    out
}

pub(crate) struct SummaryClient {
    agent: ureq::Agent,
    url: String,
}

impl SummaryClient {
    pub(crate) fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            agent,
            url: url.into(),
        }
    }

    /// POST the description and decode the service's insights.
    ///
    /// Non-2xx statuses surface as [`SummaryError::Request`].
    pub(crate) fn request(&self, description: &str) -> Result<SessionInsights, SummaryError> {
        let start = Instant::now();
        debug!(url = %self.url, bytes = description.len(), "requesting usage insights");

        let response = self.agent.post(self.url.as_str()).send_json(InsightsRequest {
            session_data: description,
        })?;
        let mut body = response.into_body();
        let envelope: InsightsEnvelope = serde_json::from_reader(body.as_reader())?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "received usage insights"
        );
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::load_sessions_from_str;
    use std::io::{BufRead, BufReader, Read, Write as _};
    use std::net::TcpListener;
    use std::thread;

    /// Serve exactly one HTTP request with a canned status and body, returning the request body.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/analyzeSessionInsights", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            String::from_utf8(request_body).unwrap()
        });
        (url, handle)
    }

    fn sessions() -> Vec<Session> {
        load_sessions_from_str(
            r#"[
                {"loginTime": "01-08-2024 10:00:00", "sessionTime": "26:00:05", "download": 150.5, "upload": 75.25},
                {"loginTime": "31-07-2024 23:00:00", "sessionTime": "02:00:00", "download": 100, "upload": 50}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn description_is_one_line_per_session_oldest_first() {
        assert_eq!(
            describe_usage(&sessions()),
            "31-07-2024 23:00:00, duration 02:00:00, download 100.00 MB, upload 50.00 MB\n\
             01-08-2024 10:00:00, duration 26:00:05, download 150.50 MB, upload 75.25 MB\n"
        );
        assert_eq!(describe_usage(&[]), "");
    }

    #[test]
    fn request_posts_description_and_decodes_insights() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"data": {"sessionLevelSummary": "Long sessions", "peakHours": "20:00-23:00"}}"#,
        );
        let client = SummaryClient::new(url, Duration::from_secs(5));
        let insights = client.request("line one\n").unwrap();

        assert_eq!(insights.session_level_summary, "Long sessions");
        assert_eq!(insights.peak_hours, "20:00-23:00");
        assert_eq!(insights.quiet_hours, "");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"sessionData": "line one\n"}));
    }

    #[test]
    fn error_status_is_a_request_error() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);
        let client = SummaryClient::new(url, Duration::from_secs(5));
        let err = client.request("x").unwrap_err();
        assert!(matches!(err, SummaryError::Request(_)));
        server.join().unwrap();
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let (url, server) = serve_once("200 OK", "not json");
        let client = SummaryClient::new(url, Duration::from_secs(5));
        let err = client.request("x").unwrap_err();
        assert!(matches!(err, SummaryError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_service_is_a_request_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = SummaryClient::new(
            format!("http://127.0.0.1:{port}/api/analyzeSessionInsights"),
            Duration::from_secs(2),
        );
        assert!(matches!(client.request("x"), Err(SummaryError::Request(_))));
    }
}
