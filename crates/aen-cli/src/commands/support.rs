use std::io::{self, Write};
use std::path::Path;

use aen_core::config::PASSWORD_ENV;
use aen_core::{AenClient, ClientConfig, RetryPolicy};
use anyhow::{Context, Result, bail};

use crate::cli::ConnectionArgs;

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn password_from_env() -> Option<String> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
}

/// Layers flags and env over the optional TOML file.
pub(super) fn resolve_config(
    args: &ConnectionArgs,
    password: Option<String>,
) -> Result<ClientConfig> {
    let mut config = match (&args.config, &args.base_url) {
        (Some(path), _) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(base_url)) => ClientConfig::new(base_url.clone()),
        (None, None) => bail!("no API endpoint: pass --base-url or set AEN_BASE_URL"),
    };

    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(username) = &args.username {
        config.username = Some(username.clone());
    }
    if password.is_some() {
        config.password = password;
    }
    if let Some(service_id) = &args.service_id {
        config.service_id = Some(service_id.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(path) = &args.request_log {
        config.request_log_path = Some(path.clone());
    }
    if args.retry && config.retry.is_none() {
        config.retry = Some(RetryPolicy::default());
    }
    if let (Some(max_retries), Some(policy)) = (args.retry_max, config.retry.as_mut()) {
        policy.max_retries = max_retries;
    }

    Ok(config.validated()?)
}

pub(super) fn ensure_credentials(config: &ClientConfig) -> Result<()> {
    let missing_username = config.username.as_deref().is_none_or(str::is_empty);
    let missing_password = config.password.as_deref().is_none_or(str::is_empty);
    match (missing_username, missing_password) {
        (false, false) => Ok(()),
        (true, _) => bail!("missing credentials: pass --username or set AEN_USERNAME"),
        (false, true) => bail!("missing credentials: set {PASSWORD_ENV}"),
    }
}

/// Runs `operation` between login and logout. The operation's error wins
/// over a logout failure, which is only logged.
pub(super) fn with_session<R>(
    client: &mut AenClient,
    operation: impl FnOnce(&mut AenClient) -> aen_core::Result<R>,
) -> Result<R> {
    client.login().context("login failed")?;
    let outcome = operation(client);
    if let Err(err) = client.logout() {
        tracing::warn!(error = %err, "logout failed");
    }
    Ok(outcome?)
}

pub(super) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
