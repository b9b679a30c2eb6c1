use std::path::PathBuf;

use aen_core::models::View;
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};

use super::parsers::{parse_min_one_u32, parse_min_one_u64, parse_view};

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// TOML file with `ClientConfig` fields; flags and env override it.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// API root, e.g. `https://host/aeneis/api/v2`.
    #[arg(long, global = true, env = "AEN_BASE_URL")]
    pub base_url: Option<String>,
    /// Login name. The password is only read from `AEN_PASSWORD`.
    #[arg(long, global = true, env = "AEN_USERNAME")]
    pub username: Option<String>,
    #[arg(long, global = true, env = "AEN_SERVICE_ID")]
    pub service_id: Option<String>,
    #[arg(long, global = true, env = "AEN_TIMEOUT_MS", value_parser = parse_min_one_u64)]
    pub timeout_ms: Option<u64>,
    /// Append one JSON line per request to this file.
    #[arg(long, global = true, env = "AEN_REQUEST_LOG", value_name = "FILE")]
    pub request_log: Option<PathBuf>,
    /// Retry idempotent requests on 429/5xx with backoff.
    #[arg(
        long,
        global = true,
        env = "AEN_RETRY",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub retry: bool,
    /// Retries per request once retrying is enabled.
    #[arg(long, global = true, env = "AEN_RETRY_MAX", value_name = "N")]
    pub retry_max: Option<u32>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long, value_parser = parse_view)]
    pub view: Option<View>,
    /// Restrict matching to these attributes (repeatable).
    #[arg(long = "attribute", value_name = "NAME")]
    pub attributes: Vec<String>,
    /// Restrict results to these categories (repeatable).
    #[arg(long = "category", value_name = "ID")]
    pub categories: Vec<String>,
    #[arg(long, value_parser = parse_min_one_u32)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct LocaleArgs {
    /// Switch the session locale instead of printing it.
    #[arg(long, value_name = "TAG")]
    pub set: Option<String>,
}
