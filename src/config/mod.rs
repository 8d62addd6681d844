// src/config/mod.rs
// Layered configuration: CLI flags > environment (resolved by clap) > config file > defaults

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::oracle::{DEFAULT_API_BASE, DEFAULT_MODEL};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY required (set via --api-key, env var, or {})", default_config_path().display())]
    MissingApiKey,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Directory holding `config.toml` and an optional `.env`
pub fn config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".talkimoji")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Optional values read from `config.toml`
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub page: Option<PathBuf>,
    pub proxy: Option<String>,
}

impl FileConfig {
    /// Load an explicitly named file (must exist) or the default one (may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub page: Option<PathBuf>,
    pub proxy: Option<String>,
}

/// Outbound proxy for oracle calls
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxySetting {
    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY
    #[default]
    System,
    /// Connect directly
    Disabled,
    Url(String),
}

impl ProxySetting {
    /// `SYSTEM` and `NONE` are keywords (case-insensitive); anything else is a proxy URL.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("system") {
            ProxySetting::System
        } else if value.eq_ignore_ascii_case("none") {
            ProxySetting::Disabled
        } else {
            ProxySetting::Url(value.to_string())
        }
    }
}

/// Everything the oracle client needs
#[derive(Clone)]
pub struct OracleConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
    pub proxy: ProxySetting,
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serve the page from this file instead of the built-in copy
    pub page: Option<PathBuf>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fully resolved, immutable settings built once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub oracle: OracleConfig,
    pub server: ServerConfig,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn resolve(overrides: ConfigOverrides, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = non_blank(overrides.api_key)
            .or(non_blank(file.api_key))
            .ok_or(ConfigError::MissingApiKey)?;

        let api_base = non_blank(overrides.api_base)
            .or(non_blank(file.api_base))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let model = non_blank(overrides.model)
            .or(non_blank(file.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        let host = non_blank(overrides.host)
            .or(non_blank(file.host))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let proxy = overrides
            .proxy
            .or(file.proxy)
            .map(|p| ProxySetting::parse(&p))
            .unwrap_or_default();

        Ok(Self {
            oracle: OracleConfig {
                api_key,
                api_base,
                model,
                timeout: Duration::from_secs(timeout_secs),
                proxy,
            },
            server: ServerConfig {
                host,
                port,
                page: overrides.page.or(file.page),
            },
        })
    }
}

/// Load `.env` from the config dir if present, otherwise from the working directory.
pub fn load_dotenv() {
    let path = config_dir().join(".env");
    if path.exists() {
        let _ = dotenvy::from_path(&path);
    } else {
        let _ = dotenvy::dotenv();
    }
}
