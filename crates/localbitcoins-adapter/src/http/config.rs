/*
[INPUT]:  YAML file, environment variables, or builder calls
[OUTPUT]: Immutable client configuration (credentials, base URL, flags)
[POS]:    Configuration layer - explicit settings passed to the client
[UPDATE]: When adding new configuration options
*/

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::http::Result;
use crate::http::params::Params;

pub const DEFAULT_BASE_URL: &str = "https://localbitcoins.com/";

pub const ENV_API_KEY: &str = "LOCALBITCOINS_API_KEY";
pub const ENV_API_SECRET: &str = "LOCALBITCOINS_API_SECRET";
pub const ENV_BASE_URL: &str = "LOCALBITCOINS_BASE_URL";

/// Client configuration
///
/// `api_key` and `api_secret` default to empty and must be set before the
/// client is built.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
    /// Log params and the signed message at debug level
    pub debug: bool,
    /// Decode response bodies as JSON
    pub deserialize: bool,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Sent with every request; per-call params override them
    pub extra_params: Params,
    /// Sent with every request; per-call headers override them
    pub extra_headers: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            deserialize: true,
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            extra_params: Params::new(),
            extra_headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Self::default()
        }
    }

    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Read credentials (and optionally the base URL) from the environment
    ///
    /// Unset variables leave the defaults in place.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup(ENV_API_KEY) {
            config.api_key = key;
        }
        if let Some(secret) = lookup(ENV_API_SECRET) {
            config.api_secret = secret;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_deserialize(mut self, deserialize: bool) -> Self {
        self.deserialize = deserialize;
        self
    }

    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout_ms = duration_millis(timeout);
        self.connect_timeout_ms = duration_millis(connect_timeout);
        self
    }

    pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(key.into(), value.into());
        self
    }

    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.api_secret.as_bytes().to_vec())
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .field("deserialize", &self.deserialize)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("extra_params", &self.extra_params)
            .field("extra_headers", &self.extra_headers)
            .finish()
    }
}
