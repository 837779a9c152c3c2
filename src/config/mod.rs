use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub db: DbConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
    pub auth_token: AuthTokenConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub ssl_mode: SslMode,
    #[serde(default)]
    pub dbname: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    #[default]
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            other => Err(ConfigError::Invalid(format!("unknown ssl_mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// `stdout`, `stderr`, or a file path
    #[serde(default = "default_sink")]
    pub sink: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthTokenConfig {
    pub admin: String,
}

// Keep the admin token out of debug output
impl fmt::Debug for AuthTokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokenConfig").field("admin", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_sink() -> String {
    "stdout".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Ports show up both as numbers and as quoted strings in YAML
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u16),
        Text(String),
    }

    match RawPort::deserialize(deserializer)? {
        RawPort::Number(port) => Ok(port),
        RawPort::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{}'", text))),
    }
}

fn parse_port_override(key: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{} must be a port number, got '{}'", key, value)))
}

impl AppConfig {
    /// Read, apply environment overrides, and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_yaml_str(&raw)?.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Database overrides
        if let Some(v) = lookup("DB_HOST") {
            self.db.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.db.port = parse_port_override("DB_PORT", &v)?;
        }
        if let Some(v) = lookup("DB_USER") {
            self.db.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.db.password = v;
        }
        if let Some(v) = lookup("DB_SSL_MODE") {
            self.db.ssl_mode = v.parse()?;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.db.dbname = Some(v);
        }

        // Logger overrides
        if let Some(v) = lookup("LOG_LEVEL") {
            self.logger.level = v;
        }

        // Auth overrides
        if let Some(v) = lookup("ADMIN_TOKEN") {
            self.auth_token.admin = v;
        }

        // Server overrides
        if let Some(v) = lookup("SERVER_PORT") {
            self.server.port = parse_port_override("SERVER_PORT", &v)?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth_token.admin.is_empty() {
            return Err(ConfigError::Invalid("auth_token.admin must not be empty".into()));
        }
        if self.db.host.is_empty() {
            return Err(ConfigError::Invalid("db.host must not be empty".into()));
        }
        if self.db.max_connections == 0 {
            return Err(ConfigError::Invalid("db.max_connections must be positive".into()));
        }
        if self.logger.sink.is_empty() {
            return Err(ConfigError::Invalid("logger.sink must not be empty".into()));
        }
        Ok(())
    }
}
