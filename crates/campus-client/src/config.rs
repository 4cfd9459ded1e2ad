//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client can start against a local
//! development server with zero configuration.

use std::path::PathBuf;
use std::time::Duration;

use campus_shared::constants::DEFAULT_API_URL;

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to.
    /// Env: `CAMPUS_API_URL`
    /// Default: `http://localhost:8000`
    pub api_url: String,

    /// `User-Agent` header sent with every request.
    /// Env: `CAMPUS_USER_AGENT`
    /// Default: `campus-client/<version>`
    pub user_agent: String,

    /// Whole-request timeout. `None` keeps the HTTP client's default.
    /// Env: `CAMPUS_TIMEOUT_SECS`
    /// Default: unset.
    pub timeout: Option<Duration>,

    /// Directory holding the encrypted session database and device key.
    /// `None` means the platform data directory.
    /// Env: `CAMPUS_DATA_DIR`
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("campus-client/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CAMPUS_API_URL") {
            match normalize_base_url(&url) {
                Ok(normalized) => config.api_url = normalized,
                Err(e) => {
                    tracing::warn!(value = %url, error = %e, "Invalid CAMPUS_API_URL, using default");
                }
            }
        }

        if let Some(agent) = lookup("CAMPUS_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.user_agent = agent;
            }
        }

        if let Some(val) = lookup("CAMPUS_TIMEOUT_SECS") {
            match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Some(Duration::from_secs(secs)),
                _ => {
                    tracing::warn!(value = %val, "Invalid CAMPUS_TIMEOUT_SECS, keeping client default");
                }
            }
        }

        if let Some(dir) = lookup("CAMPUS_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        config
    }
}

/// Validate an http(s) base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(format!("unsupported scheme: {other}")),
    }
}
