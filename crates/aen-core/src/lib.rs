// Public fallible APIs in this crate share one concrete error contract (`AenError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod mime;
pub mod models;
pub mod params;
pub mod transport;

pub use client::{AenClient, LoginOverrides, SessionState, TransactionState};
pub use config::ClientConfig;
pub use error::{AenError, DomainError, ErrorKind, Result, TransportError};
pub use transport::{
    Credentials, HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, RetryClass,
    RetryPolicy, RetryingTransport, Transport,
};
