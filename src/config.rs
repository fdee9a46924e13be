// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "OMD_CONFIG";
/// Looked up in the working directory when `OMD_CONFIG` is unset.
pub const LOCAL_CONFIG: &str = "omd.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} must be at least 1")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub ordering: OrderingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_workers: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "omd.sqlite3".to_string(),
            schema: "sql/schema.sql".to_string(),
        }
    }
}

/// With `seed` set every request orders listings from the same seed,
/// which makes page snapshots reproducible on staging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_workers == 0 {
            return Err(ConfigError::Invalid("server.max_workers"));
        }
        Ok(())
    }
}

/// Load configuration.
///
/// Search order:
/// 1. the file named by `$OMD_CONFIG` (must exist)
/// 2. `./omd.toml`
/// 3. built-in defaults
///
/// Returns the file the config came from, if any. Logging is not up yet
/// when this runs, so the caller reports it.
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = match explicit {
        Some(p) => p,
        None => {
            let local = PathBuf::from(LOCAL_CONFIG);
            if !local.exists() {
                return Ok((Config::default(), None));
            }
            local
        }
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = Config::from_toml(&path, &contents)?;
    Ok((config, Some(path)))
}
