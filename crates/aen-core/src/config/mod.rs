use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::error::{AenError, Result};
use crate::transport::RetryPolicy;

mod env;

pub const BASE_URL_ENV: &str = "AEN_BASE_URL";
pub const USERNAME_ENV: &str = "AEN_USERNAME";
pub const PASSWORD_ENV: &str = "AEN_PASSWORD";
pub const SERVICE_ID_ENV: &str = "AEN_SERVICE_ID";
pub const TIMEOUT_MS_ENV: &str = "AEN_TIMEOUT_MS";
pub const USER_AGENT_ENV: &str = "AEN_USER_AGENT";
pub const REQUEST_LOG_ENV: &str = "AEN_REQUEST_LOG";
pub const RETRY_ENV: &str = "AEN_RETRY";
pub const RETRY_MAX_ENV: &str = "AEN_RETRY_MAX";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub fn default_user_agent() -> String {
    format!("aen-client/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Connection and credential defaults for one client instance.
///
/// `username`/`password`/`service_id` are instance defaults; `login` may
/// override them per call.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub request_log_path: Option<PathBuf>,
    #[serde(default)]
    pub retry: Option<RetryPolicy>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("service_id", &self.service_id)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("request_log_path", &self.request_log_path)
            .field("retry", &self.retry)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            service_id: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
            request_log_path: None,
            retry: None,
        }
    }

    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    #[must_use]
    pub fn with_request_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.request_log_path = Some(path.into());
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from `AEN_*` settings resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup: &env::Lookup<'_> = &lookup;
        let base_url = env::read_non_empty(lookup, BASE_URL_ENV)
            .ok_or_else(|| AenError::Config(format!("{BASE_URL_ENV} is not set")))?;
        let mut config = Self::new(base_url);
        config.username = env::read_non_empty(lookup, USERNAME_ENV);
        config.password = env::read_secret(lookup, PASSWORD_ENV);
        config.service_id = env::read_non_empty(lookup, SERVICE_ID_ENV);
        if let Some(timeout_ms) = env::read_u64(lookup, TIMEOUT_MS_ENV) {
            config.timeout_ms = timeout_ms;
        }
        if let Some(user_agent) = env::read_non_empty(lookup, USER_AGENT_ENV) {
            config.user_agent = user_agent;
        }
        config.request_log_path = env::read_non_empty(lookup, REQUEST_LOG_ENV).map(PathBuf::from);
        if env::parse_env_bool(lookup(RETRY_ENV).as_deref()) {
            let mut policy = RetryPolicy::default();
            if let Some(max_retries) = env::read_u32(lookup, RETRY_MAX_ENV) {
                policy.max_retries = max_retries;
            }
            config.retry = Some(policy);
        }
        config.validated()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validated()
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Normalises the base URL and rejects settings no request could use.
    pub fn validated(mut self) -> Result<Self> {
        self.base_url = parse_base_url(&self.base_url)?;
        if self.timeout_ms == 0 {
            return Err(AenError::Config("timeout_ms must be > 0".to_string()));
        }
        self.username = self.username.filter(|value| !value.trim().is_empty());
        self.service_id = self.service_id.filter(|value| !value.trim().is_empty());
        Ok(self)
    }
}

/// Returns the canonical form of `raw` without a trailing slash.
///
/// The authority is checked on the raw text as well, since URL parsing reads
/// `https:///api` as host `api`.
pub fn parse_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let Some((_, rest)) = raw.split_once("://") else {
        return Err(AenError::Config(format!(
            "base_url must use http or https: '{raw}'"
        )));
    };
    if rest.is_empty() || rest.starts_with('/') {
        return Err(AenError::Config(format!("base_url host is missing: '{raw}'")));
    }
    let url = Url::parse(raw)
        .map_err(|e| AenError::Config(format!("invalid base_url '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AenError::Config(format!(
            "base_url must use http or https: '{raw}'"
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AenError::Config(format!("base_url host is missing: '{raw}'")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(AenError::Config(format!(
            "base_url must not carry a query or fragment: '{raw}'"
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
