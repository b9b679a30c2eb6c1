use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AenError>;

/// Classified outcome of a request the server answered with a failure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    PermissionDenied,
    NotFound,
    Validation,
    Conflict,
    TransactionProtocol,
    ServerFault,
    Unclassified,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Authentication => "AUTHENTICATION",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_FAILED",
            Self::Conflict => "CONFLICT",
            Self::TransactionProtocol => "TRANSACTION_PROTOCOL",
            Self::ServerFault => "SERVER_FAULT",
            Self::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Phrase used when the response carried nothing readable.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Authentication => "authentication required",
            Self::PermissionDenied => "permission denied / authentication required",
            Self::NotFound => "resource not found",
            Self::Validation => "validation error",
            Self::Conflict => "conflict",
            Self::TransactionProtocol => "transaction protocol violation",
            Self::ServerFault => "server error",
            Self::Unclassified => "unexpected error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Authentication => "authentication failed",
            Self::PermissionDenied => "permission denied",
            Self::NotFound => "not found",
            Self::Validation => "validation failed",
            Self::Conflict => "conflict",
            Self::TransactionProtocol => "transaction protocol error",
            Self::ServerFault => "server fault",
            Self::Unclassified => "unclassified error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    kind: ErrorKind,
    status: Option<u16>,
    message: Option<String>,
}

impl DomainError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: Some(message.into()),
        }
    }

    pub fn from_status(kind: ErrorKind, status: u16, message: Option<String>) -> Self {
        Self {
            kind,
            status: Some(status),
            message,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for DomainError {}

/// The server could not be reached or did not answer in time.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "TRANSPORT_TIMEOUT",
            Self::Connect(_) => "TRANSPORT_CONNECT",
            Self::Request(_) => "TRANSPORT_REQUEST",
            Self::Body(_) => "TRANSPORT_BODY",
        }
    }
}

#[derive(Debug, Error)]
pub enum AenError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl AenError {
    pub fn domain(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Domain(DomainError::new(kind, message))
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(err) => err.kind().code(),
            Self::Transport(err) => err.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
        }
    }

    pub fn domain_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_display_includes_kind_and_message() {
        let err = DomainError::from_status(ErrorKind::NotFound, 404, Some("object A1".to_string()));
        assert_eq!(err.to_string(), "not found: object A1");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn domain_error_without_message_prints_kind_only() {
        let err = DomainError::from_status(ErrorKind::ServerFault, 500, None);
        assert_eq!(err.to_string(), "server fault");
        assert_eq!(err.message(), None);
    }

    #[test]
    fn aen_error_separates_domain_from_transport() {
        let domain = AenError::domain(ErrorKind::Conflict, "busy");
        assert_eq!(domain.domain_kind(), Some(ErrorKind::Conflict));
        assert!(!domain.is_transport());
        assert_eq!(domain.code(), "CONFLICT");

        let transport = AenError::from(TransportError::Timeout("30s".to_string()));
        assert_eq!(transport.domain_kind(), None);
        assert!(transport.is_transport());
        assert_eq!(transport.code(), "TRANSPORT_TIMEOUT");
    }
}
