use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AenError, Result};
use crate::models::RequestLogEntry;
use crate::transport::{HttpRequest, HttpResponse};

/// Append-only JSONL record of every request the client sent. Writing is best
/// effort and never fails the request itself.
#[derive(Debug, Clone, Default)]
pub(super) struct RequestLog {
    path: Option<PathBuf>,
}

impl RequestLog {
    pub(super) const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub(super) fn record(
        &self,
        operation: &str,
        request: &HttpRequest,
        started: Instant,
        outcome: &Result<HttpResponse>,
    ) {
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let (status, http_status, error) = match outcome {
            Ok(response) => {
                tracing::debug!(operation, status = response.status, latency_ms, "request completed");
                ("ok", Some(response.status), None)
            }
            Err(err @ AenError::Transport(_)) => {
                tracing::warn!(operation, error = %err, latency_ms, "request did not reach the server");
                ("error", None, Some(err))
            }
            Err(err) => {
                let http_status = match err {
                    AenError::Domain(domain) => domain.status(),
                    _ => None,
                };
                tracing::debug!(operation, code = err.code(), latency_ms, "request failed");
                ("error", http_status, Some(err))
            }
        };

        self.append(&RequestLogEntry {
            request_id: Uuid::new_v4().to_string(),
            operation: operation.to_string(),
            method: request.method.to_string(),
            path: request.path.clone(),
            status: status.to_string(),
            latency_ms,
            created_at: Utc::now().to_rfc3339(),
            http_status,
            error_code: error.map(|err| err.code().to_string()),
            error_message: error.map(ToString::to_string),
        });
    }

    fn append(&self, entry: &RequestLogEntry) {
        if let Some(path) = &self.path
            && let Ok(serialized) = serde_json::to_string(entry)
            && let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path)
        {
            let mut line = serialized;
            line.push('\n');
            let _ = file.write_all(line.as_bytes());
        }
    }
}
