use ledger::StoreOptions;
use ledger::seed::SeedConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use types::amount::Amount;

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG_PATH is not set")]
    MissingPath,

    #[error("config file does not exist: {0}")]
    NotFound(PathBuf),

    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Deployment environment; selects the log format and default level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub env: Env,
    /// SQLite database file
    pub storage_path: PathBuf,
    /// Listen address, `host:port`
    #[serde(default = "default_http_server")]
    pub http_server: String,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let defaults = StoreOptions::default();
        Self {
            max_connections: defaults.max_connections,
            busy_timeout_ms: defaults.busy_timeout.as_millis() as u64,
        }
    }
}

impl StorageConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            max_connections: self.max_connections,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}

/// Demo accounts created on an empty store
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    pub accounts: usize,
    pub initial_balance: Amount,
}

impl Default for SeedSettings {
    fn default() -> Self {
        let defaults = SeedConfig::default();
        Self {
            accounts: defaults.accounts,
            initial_balance: defaults.initial_balance,
        }
    }
}

impl SeedSettings {
    pub fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            accounts: self.accounts,
            initial_balance: self.initial_balance,
        }
    }
}

fn default_http_server() -> String {
    "localhost:8080".to_string()
}

impl Config {
    /// Load the file named by `CONFIG_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingPath)?;
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage_path is empty".into()));
        }
        if self.http_server.is_empty() {
            return Err(ConfigError::Invalid("http_server is empty".into()));
        }
        if self.storage.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "storage.max_connections must be at least 1".into(),
            ));
        }
        if self.seed.initial_balance.is_negative() {
            return Err(ConfigError::Invalid(
                "seed.initial_balance must not be negative".into(),
            ));
        }
        Ok(())
    }
}
