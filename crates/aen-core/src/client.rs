use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpTransport, ReqwestTransport, RetryingTransport, Transport};

mod appdir_service;
mod dispatch;
mod file_service;
mod locale_service;
mod object_service;
mod request_log_service;
mod search_service;
mod session_service;
mod transaction_service;
mod version_service;

pub use session_service::LoginOverrides;

use self::request_log_service::RequestLog;

/// Local view of the server-side session. The token itself stays inside the
/// transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub authenticated: bool,
    pub username: Option<String>,
    pub service_id: Option<String>,
    pub established_at: Option<DateTime<Utc>>,
}

/// Advisory cache of whether the server holds an open transaction for this
/// session. Server responses always win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    #[default]
    Idle,
    Open,
}

/// One client per logical session. All state is owned here and mutated only
/// through `&mut self`; share across threads by wrapping it yourself.
pub struct AenClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    session: SessionState,
    transaction: TransactionState,
    request_log: RequestLog,
}

impl<T: Transport> std::fmt::Debug for AenClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AenClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .field("transaction", &self.transaction)
            .finish_non_exhaustive()
    }
}

impl AenClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.validated()?;
        let inner = ReqwestTransport::new(&config)?;
        let transport = match &config.retry {
            Some(policy) => RetryingTransport::new(inner, policy.clone()),
            None => RetryingTransport::passthrough(inner),
        };
        Ok(Self::with_transport(config, transport))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> AenClient<T> {
    /// Uses a caller-supplied transport; `config` is taken as already validated
    /// apart from credential defaults.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let request_log = RequestLog::new(config.request_log_path.clone());
        Self {
            config,
            transport,
            session: SessionState::default(),
            transaction: TransactionState::Idle,
            request_log,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
