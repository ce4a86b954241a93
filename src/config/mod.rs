// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, ProviderBackend, StaticConfig};

/// Environment markers of restricted/serverless platforms without a writable disk
const SERVERLESS_MARKERS: &[&str] = &["VERCEL", "AWS_LAMBDA_FUNCTION_NAME", "NETLIFY"];

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("ASSETS").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("http.server_name", "asset-proxy/0.3")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("provider.backend", "freepik")?
            .set_default("static.root", "public")?
            .set_default("static.index_file", "index.html")?
            .set_default("downloads.file", "downloads.json")?
            .set_default("downloads.persist", true)?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        Ok(cfg.with_credential(non_empty_env))
    }

    /// Resolve the provider credential once the backend is known.
    ///
    /// The backend's environment variable wins over `provider.api_key`.
    fn with_credential(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let from_file = self
            .provider
            .api_key
            .take()
            .filter(|k| !k.trim().is_empty());
        self.provider.api_key = lookup(self.provider.backend.credential_env()).or(from_file);
        self
    }

    /// Load from the default location, or the path given as first CLI argument
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
        Self::load_from(&path)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Whether the download counter may touch the filesystem
    pub fn downloads_persistent(&self) -> bool {
        self.downloads.persist && !running_serverless()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn running_serverless() -> bool {
    SERVERLESS_MARKERS
        .iter()
        .any(|marker| std::env::var_os(marker).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.static_files.index_file, "index.html");
        assert_eq!(cfg.static_files.pages.get("/privacy").unwrap(), "privacy.html");
        assert!(cfg.http.enable_cors);
        assert!(cfg.get_socket_addr().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxy.toml");
        std::fs::write(
            &path,
            r#"
[provider]
backend = "iconscout"
base_url = "http://127.0.0.1:9999"

[downloads]
file = "counts.json"
persist = false
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.with_extension("").to_str().unwrap()).unwrap();
        assert_eq!(cfg.provider.backend, ProviderBackend::Iconscout);
        assert_eq!(cfg.provider.base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(cfg.downloads.file, "counts.json");
        assert!(!cfg.downloads_persistent());
    }

    #[test]
    fn test_credential_follows_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iconscout.toml");
        std::fs::write(&path, "[provider]\nbackend = \"iconscout\"\n").unwrap();
        std::env::set_var("ICONSCOUT_CLIENT_ID", "client-123");

        let cfg = Config::load_from(path.with_extension("").to_str().unwrap()).unwrap();
        assert_eq!(cfg.provider.backend, ProviderBackend::Iconscout);
        assert_eq!(cfg.provider.api_key.as_deref(), Some("client-123"));
    }

    #[test]
    fn test_credential_lookup_by_backend() {
        let mut cfg = Config::load_from("does-not-exist/config").unwrap();
        cfg.provider.backend = ProviderBackend::Iconscout;
        cfg.provider.api_key = Some("from-file".to_string());

        let env = |name: &str| (name == "ICONSCOUT_CLIENT_ID").then(|| "from-env".to_string());
        let resolved = cfg.clone().with_credential(env);
        assert_eq!(resolved.provider.api_key.as_deref(), Some("from-env"));

        let resolved = cfg.clone().with_credential(|_| None);
        assert_eq!(resolved.provider.api_key.as_deref(), Some("from-file"));

        cfg.provider.backend = ProviderBackend::Freepik;
        cfg.provider.api_key = None;
        let resolved = cfg.with_credential(env);
        assert_eq!(resolved.provider.api_key, None);
    }

    #[test]
    fn test_credential_env_names() {
        assert_eq!(ProviderBackend::Freepik.credential_env(), "FREEPIK_API_KEY");
        assert_eq!(ProviderBackend::Iconscout.credential_env(), "ICONSCOUT_CLIENT_ID");
    }
}
