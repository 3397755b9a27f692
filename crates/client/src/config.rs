//! Client configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("could not resolve a data directory for the session store; set STOCKDESK_STORE_PATH")]
    NoDataDir,
}

/// Runtime configuration for the console client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash (e.g. `http://localhost:8000`).
    pub api_url: String,

    /// Upper bound for the token exchange.
    pub login_timeout: Duration,

    /// SQLite file holding the persisted tokens.
    pub store_path: PathBuf,
}

impl ClientConfig {
    pub const API_URL_VAR: &'static str = "STOCKDESK_API_URL";
    pub const LOGIN_TIMEOUT_VAR: &'static str = "STOCKDESK_LOGIN_TIMEOUT_SECS";
    pub const STORE_PATH_VAR: &'static str = "STOCKDESK_STORE_PATH";

    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables fall
    /// back to defaults; set-but-invalid ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let api_url = match get(Self::API_URL_VAR) {
            Some(raw) => normalize_api_url(&raw)?,
            None => Self::DEFAULT_API_URL.to_string(),
        };

        let login_timeout = match get(Self::LOGIN_TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => Self::DEFAULT_LOGIN_TIMEOUT,
        };

        let store_path = match get(Self::STORE_PATH_VAR) {
            Some(raw) => PathBuf::from(raw.trim()),
            None => default_store_path()?,
        };

        Ok(Self {
            api_url,
            login_timeout,
            store_path,
        })
    }

    /// Configuration pointing at `api_url` with defaults elsewhere.
    pub fn for_api(api_url: &str, store_path: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            login_timeout: Self::DEFAULT_LOGIN_TIMEOUT,
            store_path,
        })
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: ClientConfig::API_URL_VAR,
        reason,
    };

    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
        var: ClientConfig::LOGIN_TIMEOUT_VAR,
        reason: format!("{e}"),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var: ClientConfig::LOGIN_TIMEOUT_VAR,
            reason: "must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// `<data dir>/stockdesk/session.db`.
pub fn default_store_path() -> Result<PathBuf, ConfigError> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;

    dir.push("stockdesk");
    dir.push("session.db");
    Ok(dir)
}
