//! Client configuration.
//!
//! # Design
//! A `ClientConfig` is built once, handed to the client and never mutated
//! afterwards. The bearer token it carries goes on every request unchanged
//! and never shows up in `Debug` output.

use std::time::Duration;

use crate::error::{ApiError, Result};

/// Base URL used by `from_env` when `BARUWA_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://localhost";
/// Sent as `User-Agent` unless overridden with `with_user_agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("BaruwaAPI-Rust/", env!("CARGO_PKG_VERSION"));

/// Connection settings for one client. Fixed once the client is built.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) token: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Option<Duration>,
}

impl ClientConfig {
    /// Trailing slashes on `base_url` are dropped so paths join cleanly.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// Read `BARUWA_API_URL`, `BARUWA_API_TOKEN` and `BARUWA_API_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BARUWA_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("BARUWA_API_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::Config("BARUWA_API_TOKEN is not set".to_string()))?;

        let mut config = Self::new(&base_url, token.trim());
        if let Ok(raw) = std::env::var("BARUWA_API_TIMEOUT_MS") {
            let millis = raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("invalid BARUWA_API_TIMEOUT_MS {raw:?}: {e}"))
            })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }
        Ok(config)
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}
