use std::fs;
use std::path::PathBuf;

use aen_core::ClientConfig;
use tempfile::tempdir;

use super::support::{ensure_credentials, resolve_config, write_output};
use crate::cli::ConnectionArgs;

fn connection(base_url: Option<&str>) -> ConnectionArgs {
    ConnectionArgs {
        config: None,
        base_url: base_url.map(ToString::to_string),
        username: None,
        service_id: None,
        timeout_ms: None,
        request_log: None,
        retry: false,
        retry_max: None,
    }
}

#[test]
fn resolve_config_requires_an_endpoint() {
    let err = resolve_config(&connection(None), None).expect_err("no endpoint");
    assert!(err.to_string().contains("--base-url"));
}

#[test]
fn resolve_config_applies_flags_and_password() {
    let mut args = connection(Some("https://aeneis.test/api/v2/"));
    args.username = Some("alice".to_string());
    args.service_id = Some("svc".to_string());
    args.timeout_ms = Some(900);
    args.retry = true;

    let config = resolve_config(&args, Some("pw".to_string())).expect("config");
    assert_eq!(config.base_url, "https://aeneis.test/api/v2");
    assert_eq!(config.username.as_deref(), Some("alice"));
    assert_eq!(config.password.as_deref(), Some("pw"));
    assert_eq!(config.service_id.as_deref(), Some("svc"));
    assert_eq!(config.timeout_ms, 900);
    assert!(config.retry.is_some());
}

#[test]
fn flags_override_toml_file_values() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("aen.toml");
    fs::write(
        &path,
        "base_url = \"https://file.test/api\"\nusername = \"from-file\"\npassword = \"file-pw\"\ntimeout_ms = 5000\n",
    )
    .expect("write config");

    let mut args = connection(None);
    args.config = Some(path.clone());
    let config = resolve_config(&args, None).expect("file only");
    assert_eq!(config.base_url, "https://file.test/api");
    assert_eq!(config.username.as_deref(), Some("from-file"));
    assert_eq!(config.password.as_deref(), Some("file-pw"));
    assert_eq!(config.timeout_ms, 5000);

    args.base_url = Some("https://flag.test/api".to_string());
    args.username = Some("from-flag".to_string());
    let config = resolve_config(&args, Some("env-pw".to_string())).expect("overridden");
    assert_eq!(config.base_url, "https://flag.test/api");
    assert_eq!(config.username.as_deref(), Some("from-flag"));
    assert_eq!(config.password.as_deref(), Some("env-pw"));
}

#[test]
fn retry_max_applies_only_once_retry_is_enabled() {
    let mut args = connection(Some("https://aeneis.test/api"));
    args.retry_max = Some(1);
    let config = resolve_config(&args, None).expect("config");
    assert!(config.retry.is_none());

    args.retry = true;
    let config = resolve_config(&args, None).expect("config");
    assert_eq!(config.retry.expect("retry").max_retries, 1);
}

#[test]
fn retry_max_overrides_the_toml_retry_section() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("aen.toml");
    fs::write(
        &path,
        "base_url = \"https://file.test/api\"\n\n[retry]\nmax_retries = 5\n",
    )
    .expect("write config");

    let mut args = connection(None);
    args.config = Some(path);
    args.retry_max = Some(2);
    let config = resolve_config(&args, None).expect("config");
    assert_eq!(config.retry.expect("retry").max_retries, 2);
}

#[test]
fn resolve_config_rejects_host_less_urls() {
    let err = resolve_config(&connection(Some("https:///api/v2")), None).expect_err("host");
    assert!(err.to_string().contains("host"));
}

#[test]
fn resolve_config_rejects_invalid_scheme() {
    let err = resolve_config(&connection(Some("ftp://aeneis.test")), None).expect_err("scheme");
    assert!(err.to_string().contains("http"));
}

#[test]
fn ensure_credentials_names_the_missing_piece() {
    let config = ClientConfig::new("https://aeneis.test");
    let err = ensure_credentials(&config).expect_err("no username");
    assert!(err.to_string().contains("AEN_USERNAME"));

    let mut config = ClientConfig::new("https://aeneis.test");
    config.username = Some("alice".to_string());
    let err = ensure_credentials(&config).expect_err("no password");
    assert!(err.to_string().contains("AEN_PASSWORD"));

    let config = ClientConfig::new("https://aeneis.test").with_credentials("alice", "pw");
    ensure_credentials(&config).expect("complete");
}

#[test]
fn write_output_creates_parent_directories() {
    let temp = tempdir().expect("tempdir");
    let path: PathBuf = temp.path().join("nested").join("out.bin");
    write_output(&path, b"payload").expect("write");
    assert_eq!(fs::read(&path).expect("read"), b"payload");
}
