//! Maps failed HTTP responses onto [`DomainError`].
//!
//! Exact status codes are looked up in [`STATUS_TABLE`]; anything at or above
//! 500 is a server fault and every other non-2xx status is unclassified. The
//! transaction endpoints reuse 409 for protocol misuse, which is expressed as
//! named entries in [`TRANSACTION_OVERRIDES`] rather than special cases at the
//! call sites.

use serde_json::Value;

use crate::error::{DomainError, ErrorKind};

const STATUS_TABLE: &[(u16, ErrorKind)] = &[
    (400, ErrorKind::Validation),
    (401, ErrorKind::PermissionDenied),
    (403, ErrorKind::PermissionDenied),
    (404, ErrorKind::NotFound),
    (405, ErrorKind::Validation),
    (409, ErrorKind::Conflict),
];

const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionPhase {
    Begin,
    Commit,
    Rollback,
}

impl TransactionPhase {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Begin => "/session/transaction/begin",
            Self::Commit => "/session/transaction/commit",
            Self::Rollback => "/session/transaction/rollback",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Commit => "commit",
            Self::Rollback => "rollback",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatusOverride {
    pub phase: TransactionPhase,
    pub status: u16,
    pub kind: ErrorKind,
    pub message: &'static str,
}

pub const TRANSACTION_OVERRIDES: &[StatusOverride] = &[
    StatusOverride {
        phase: TransactionPhase::Begin,
        status: 409,
        kind: ErrorKind::Conflict,
        message: "a transaction is already open; commit or roll back first",
    },
    StatusOverride {
        phase: TransactionPhase::Commit,
        status: 409,
        kind: ErrorKind::TransactionProtocol,
        message: "no open transaction to commit",
    },
    StatusOverride {
        phase: TransactionPhase::Rollback,
        status: 409,
        kind: ErrorKind::TransactionProtocol,
        message: "no open transaction to rollback",
    },
];

pub const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Returns `None` for 2xx statuses.
pub fn classify_status(status: u16) -> Option<ErrorKind> {
    if is_success(status) {
        return None;
    }
    let kind = STATUS_TABLE
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, kind)| *kind)
        .unwrap_or(if status >= 500 {
            ErrorKind::ServerFault
        } else {
            ErrorKind::Unclassified
        });
    Some(kind)
}

pub fn classify(status: u16, body: &[u8]) -> Option<DomainError> {
    let kind = classify_status(status)?;
    let extracted = extract_message(body);
    let message = match kind {
        ErrorKind::Unclassified => format!(
            "HTTP {status}: {}",
            extracted.as_deref().unwrap_or(kind.default_message())
        ),
        _ => extracted.unwrap_or_else(|| kind.default_message().to_string()),
    };
    Some(DomainError::from_status(kind, status, Some(message)))
}

pub fn find_override(phase: TransactionPhase, status: u16) -> Option<&'static StatusOverride> {
    TRANSACTION_OVERRIDES
        .iter()
        .find(|entry| entry.phase == phase && entry.status == status)
}

pub fn classify_with_overrides(
    phase: TransactionPhase,
    status: u16,
    body: &[u8],
) -> Option<DomainError> {
    if is_success(status) {
        return None;
    }
    match find_override(phase, status) {
        Some(entry) => Some(DomainError::from_status(
            entry.kind,
            status,
            Some(entry.message.to_string()),
        )),
        None => classify(status, body),
    }
}

/// Best-effort human readable message from an error body. Never fails.
pub fn extract_message(body: &[u8]) -> Option<String> {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        let field = MESSAGE_FIELDS.iter().find_map(|key| {
            map.get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
        });
        if let Some(text) = field {
            return Some(text.to_string());
        }
    }

    let raw = String::from_utf8_lossy(body);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
