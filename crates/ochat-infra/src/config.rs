//! Application configuration loader for ochat.
//!
//! Reads an optional TOML file into [`AppConfig`] and layers explicit
//! overrides (environment variables and CLI flags, already merged by the
//! caller) on top. Falls back to defaults when the file is missing or
//! malformed.

use std::path::Path;

use ochat_types::config::AppConfig;

/// Values that take precedence over the config file when set.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub backend_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub web_dir: Option<String>,
}

/// Load configuration from the TOML file at `path`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config, with unset keys at their defaults.
pub async fn load_app_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Apply overrides on top of a loaded config.
pub fn apply_overrides(mut config: AppConfig, overrides: ConfigOverrides) -> AppConfig {
    if let Some(url) = overrides.database_url {
        config.database_url = url;
    }
    if let Some(url) = overrides.backend_url {
        config.backend_url = url;
    }
    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if overrides.web_dir.is_some() {
        config.web_dir = overrides.web_dir;
    }
    config
}

/// Load the config file and apply overrides in one step.
pub async fn resolve_app_config(path: &Path, overrides: ConfigOverrides) -> AppConfig {
    apply_overrides(load_app_config(path).await, overrides)
}
