//! ActivityWatch client settings.

use std::time::Duration;

use crate::error::{Error, Result};

/// Host aw-server binds to by default.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Production aw-server port.
pub const DEFAULT_PORT: u16 = 5600;

/// Port of an aw-server started with `--testing`.
pub const TESTING_PORT: u16 = 5666;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client name reported to ActivityWatch when creating buckets.
pub const CLIENT_NAME: &str = "aw-import-screentime";

/// Resolved settings for talking to aw-server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:5600`
    pub server_url: String,
    pub client_name: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config from CLI/env values.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the server URL is not an http(s) URL.
    pub fn new(server: Option<&str>, testing: bool, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            server_url: resolve_server_url(server, testing)?,
            client_name: CLIENT_NAME.to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"),
            client_name: CLIENT_NAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Resolve the aw-server base URL.
///
/// Priority: explicit URL (`--server` / `AW_SERVER_URL`) > testing port >
/// default port.
///
/// # Errors
///
/// Returns `Config` if the explicit URL has no http(s) scheme.
pub fn resolve_server_url(explicit: Option<&str>, testing: bool) -> Result<String> {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Server URL must start with http:// or https://, got {url}"
            )));
        }
        return Ok(url.trim_end_matches('/').to_string());
    }

    let port = if testing { TESTING_PORT } else { DEFAULT_PORT };
    Ok(format!("http://{DEFAULT_HOST}:{port}"))
}
