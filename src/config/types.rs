// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub provider: ProviderConfig,
    #[serde(rename = "static")]
    pub static_files: StaticConfig,
    pub downloads: DownloadsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    /// Seconds allowed for request headers to arrive
    pub read_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Which upstream marketplace serves searches
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderBackend {
    Freepik,
    Iconscout,
}

impl ProviderBackend {
    /// Environment variable holding this backend's credential
    pub const fn credential_env(self) -> &'static str {
        match self {
            Self::Freepik => "FREEPIK_API_KEY",
            Self::Iconscout => "ICONSCOUT_CLIENT_ID",
        }
    }
}

/// Upstream provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub backend: ProviderBackend,
    /// Overrides the backend's public API root
    #[serde(default)]
    pub base_url: Option<String>,
    /// Credential; normally injected from the backend's environment variable
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Front-end bundle configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticConfig {
    pub root: String,
    pub index_file: String,
    /// Fixed pages (request path -> file under `root`)
    #[serde(default = "default_static_pages")]
    pub pages: HashMap<String, String>,
}

fn default_static_pages() -> HashMap<String, String> {
    [
        ("/privacy", "privacy.html"),
        ("/terms", "terms.html"),
        ("/about", "about.html"),
    ]
    .into_iter()
    .map(|(path, file)| (path.to_string(), file.to_string()))
    .collect()
}

/// Download counter configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DownloadsConfig {
    pub file: String,
    pub persist: bool,
}
