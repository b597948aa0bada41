//! Application settings loaded from an optional TOML file and the environment.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file, environment
//! variables (`HOST`, `PORT`, `DATABASE_URL`). A missing file is not an error; a file
//! that exists but does not parse is.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Config file read when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

/// Configuration structure representing the entire config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Store settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind: an IP literal or a resolvable hostname
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port (`PORT` in the environment)
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which database the service opens
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl AppConfig {
    /// Overrides file values with whatever `lookup` returns for `HOST`, `PORT` and
    /// `DATABASE_URL`.
    ///
    /// # Errors
    /// Returns `Error::Config` if `PORT` is set but is not a valid port number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value {port:?}: {e}"),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        Ok(())
    }

    /// Host and port the HTTP server binds to.
    ///
    /// The host is passed to the resolver as-is, so names like `localhost` work as
    /// well as IP literals.
    #[must_use]
    pub fn listen_target(&self) -> (&str, u16) {
        (self.server.host.as_str(), self.server.port)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {:?}: {e}", path.as_ref()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {:?}: {e}", path.as_ref()),
    })
}

/// Builds the effective configuration: file (if any) plus environment overrides.
///
/// The file path comes from `CONFIG_PATH`, falling back to `./config.toml`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        info!("Loading configuration from {}", path);
        load_config(&path)?
    } else {
        debug!("No config file at {}, using defaults", path);
        AppConfig::default()
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
            [server]
            port = 8080
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [database]
            url = "sqlite://catalog.db?mode=rwc"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.url, "sqlite://catalog.db?mode=rwc");
        assert_eq!(config.listen_target(), ("127.0.0.1", 9000));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::default();
        let vars = env(&[("PORT", "7000"), ("DATABASE_URL", "sqlite::memory:")]);

        config
            .apply_env_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    #[test]
    fn test_hostname_is_kept_for_resolution() {
        let mut config = AppConfig::default();
        let vars = env(&[("HOST", "localhost")]);

        config
            .apply_env_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(config.listen_target(), ("localhost", 5000));
    }

    #[tokio::test]
    async fn test_listen_target_binds_by_hostname() {
        let mut config = AppConfig::default();
        let vars = env(&[("HOST", "localhost"), ("PORT", "0")]);
        config
            .apply_env_overrides(|key| vars.get(key).cloned())
            .unwrap();

        let listener = tokio::net::TcpListener::bind(config.listen_target())
            .await
            .unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = AppConfig::default();
        let vars = env(&[("PORT", "not-a-port")]);

        let result = config.apply_env_overrides(|key| vars.get(key).cloned());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("/nonexistent/catalog-config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
