//! Application configuration types.
//!
//! `AppConfig` is the shape of the optional `ochat.toml` file. Every field has
//! a default, so an empty or missing file yields a working local setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the ochat server and CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite connection string.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Base URL of the inference backend (e.g. a local Ollama daemon).
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Request timeout for the inference backend. `None` waits indefinitely.
    #[serde(default)]
    pub backend_timeout_secs: Option<u64>,

    /// Interface the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static front-end assets to serve, if any.
    #[serde(default)]
    pub web_dir: Option<String>,
}

fn default_database_url() -> String {
    "sqlite://ollama_chat.db?mode=rwc".to_string()
}

fn default_backend_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            backend_url: default_backend_url(),
            backend_timeout_secs: None,
            host: default_host(),
            port: default_port(),
            web_dir: None,
        }
    }
}
