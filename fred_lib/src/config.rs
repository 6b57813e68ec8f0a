//! Client configuration and API key resolution.
//!
//! The key comes from exactly one place, checked in order: an explicit value,
//! the first line of a key file, then an environment variable (`FRED_API_KEY`
//! unless overridden). A source that yields an empty string falls through to
//! the next one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use fred_api::ClientOptions;
use serde::Deserialize;

use crate::error::FredError;

/// Environment variable consulted when no explicit key or key file is set.
pub const API_KEY_ENV: &str = "FRED_API_KEY";

const MISSING_KEY_HELP: &str = "You need to set a valid API key. You can set it in 3 ways: \
pass the string with api_key, or set api_key_file to a file with the api key in the first line, \
or set the environment variable 'FRED_API_KEY' to the value of your api key. You can sign up \
for a free api key on the FRED website at https://fred.stlouisfed.org/";

/// Settings for a [`crate::Fred`] client. Every field is optional; unset
/// transport fields fall back to the `fred_api` defaults.
///
/// Loadable from TOML:
///
/// ```toml
/// api_key_file = "~/.fred_key"
/// proxy = "http://proxy.internal:3128"
/// timeout_secs = 60
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FredConfig {
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
    /// Name of the environment variable holding the key. Defaults to [`API_KEY_ENV`].
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FredConfig {
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::default()
        }
    }

    pub fn with_api_key_file(path: impl Into<PathBuf>) -> Self {
        Self {
            api_key_file: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FredError> {
        toml::from_str(content)
            .map_err(|e| FredError::Configuration(format!("invalid config file: {}", e)))
    }

    /// Reads a TOML config file.
    pub fn load(path: &Path) -> Result<Self, FredError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FredError::Configuration(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Self {
        Self::default().with_env_defaults()
    }

    /// Fills unset transport fields from `FRED_API_KEY_FILE`, `FRED_BASE_URL`,
    /// `FRED_PROXY` and `FRED_TIMEOUT_SECS`. Values already set win.
    pub fn with_env_defaults(self) -> Self {
        self.with_defaults_from(env_string)
    }

    fn with_defaults_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key_file.is_none() {
            self.api_key_file = lookup("FRED_API_KEY_FILE").map(PathBuf::from);
        }
        if self.base_url.is_none() {
            self.base_url = lookup("FRED_BASE_URL");
        }
        if self.proxy.is_none() {
            self.proxy = lookup("FRED_PROXY");
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = lookup("FRED_TIMEOUT_SECS").and_then(|v| parse_timeout(&v));
        }
        self
    }

    /// Resolves the API key, or fails with [`FredError::Configuration`].
    pub fn resolve_api_key(&self) -> Result<String, FredError> {
        self.resolve_api_key_from(env_string)
    }

    fn resolve_api_key_from<F>(&self, lookup: F) -> Result<String, FredError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
        if let Some(path) = &self.api_key_file {
            let key = read_key_file(path)?;
            if !key.is_empty() {
                return Ok(key);
            }
        }
        let var = self.api_key_env.as_deref().unwrap_or(API_KEY_ENV);
        if let Some(key) = lookup(var) {
            return Ok(key);
        }
        Err(FredError::Configuration(MISSING_KEY_HELP.to_string()))
    }

    pub fn client_options(&self) -> ClientOptions {
        let defaults = ClientOptions::default();
        ClientOptions {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            proxy: self.proxy.clone(),
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

fn read_key_file(path: &Path) -> Result<String, FredError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FredError::Configuration(format!("cannot read API key file {}: {}", path.display(), e))
    })?;
    Ok(content.lines().next().unwrap_or("").trim().to_string())
}

/// An unparsable timeout keeps the default rather than failing startup.
fn parse_timeout(raw: &str) -> Option<u64> {
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!("Ignoring FRED_TIMEOUT_SECS={:?}: {}", raw, e);
            None
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
