//! Application-level configuration loading: gateway location, upstream deadlines and listen port.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "OPENREXCHECK_CONFIG_PATH";

/// Environment variable holding the gateway base URL.
pub const GATEWAY_URL_ENV: &str = "OPENCLAW_GATEWAY_URL";
const HEALTH_TIMEOUT_ENV: &str = "OPENREXCHECK_HEALTH_TIMEOUT_MS";
const CHAT_TIMEOUT_ENV: &str = "OPENREXCHECK_CHAT_TIMEOUT_MS";
const PORT_ENVS: [&str; 2] = ["PORT", "SERVER_PORT"];

/// Gateway reached when nothing else is configured.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";
const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_millis(30_000);
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    gateway_url: String,
    health_timeout: Duration,
    chat_timeout: Duration,
    port: u16,
}

impl AppConfig {
    /// Load the configuration file, falling back to built-in defaults, then apply environment overrides.
    pub fn load() -> Self {
        Self::load_file().apply_overrides(|key| env::var(key).ok())
    }

    fn load_file() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        gateway = %app_config.gateway_url,
                        "loaded configuration file"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Overlay values found through `lookup` (normally the process environment).
    ///
    /// Empty values count as unset; unparsable numbers are logged and ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(GATEWAY_URL_ENV) {
            self.gateway_url = normalize_url(&url);
        }
        if let Some(timeout) =
            lookup(HEALTH_TIMEOUT_ENV).and_then(|raw| parse_millis(HEALTH_TIMEOUT_ENV, &raw))
        {
            self.health_timeout = timeout;
        }
        if let Some(timeout) =
            lookup(CHAT_TIMEOUT_ENV).and_then(|raw| parse_millis(CHAT_TIMEOUT_ENV, &raw))
        {
            self.chat_timeout = timeout;
        }
        if let Some(port) = PORT_ENVS
            .iter()
            .find_map(|&key| lookup(key).map(|raw| (key, raw)))
            .and_then(|(key, raw)| match raw.trim().parse::<u16>() {
                Ok(port) => Some(port),
                Err(err) => {
                    warn!(var = key, value = %raw, error = %err, "ignoring invalid port");
                    None
                }
            })
        {
            self.port = port;
        }

        self
    }

    /// Gateway base URL, without trailing slash.
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Deadline applied to the gateway health probe.
    pub fn health_timeout(&self) -> Duration {
        self.health_timeout
    }

    /// Deadline applied to the gateway message call.
    pub fn chat_timeout(&self) -> Duration {
        self.chat_timeout
    }

    /// TCP port the HTTP server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    gateway_url: Option<String>,
    health_timeout_ms: Option<u64>,
    chat_timeout_ms: Option<u64>,
    port: Option<u16>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            gateway_url: value
                .gateway_url
                .filter(|url| !url.trim().is_empty())
                .map(|url| normalize_url(&url))
                .unwrap_or(defaults.gateway_url),
            health_timeout: value
                .health_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.health_timeout),
            chat_timeout: value
                .chat_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.chat_timeout),
            port: value.port.unwrap_or(defaults.port),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_millis(var: &str, raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => {
            warn!(var, "ignoring zero timeout");
            None
        }
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(err) => {
            warn!(var, value = %raw, error = %err, "ignoring invalid timeout");
            None
        }
    }
}
