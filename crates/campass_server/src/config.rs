//! Process configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! `campass.toml` in the working directory, then `CAMPASS_*` environment
//! variables with `__` as the section separator (`CAMPASS_SERVER__PORT`).

use campass_core::default_log_level;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "campass";
const ENV_PREFIX: &str = "CAMPASS";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Returns the listen address as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path. Relative paths resolve against the working directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Returns the absolute log directory, defaulting to `<cwd>/logs`.
    pub fn resolve_dir(&self, cwd: &Path) -> PathBuf {
        match &self.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("logs"),
        }
    }
}

impl Settings {
    /// Loads settings from defaults, `campass.toml` and the environment.
    ///
    /// # Errors
    /// Returns an error if a source fails to parse or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Loads settings from defaults overlaid with one TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<config::builder::DefaultState>,
) -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.path", "campass.sqlite3")?
        .set_default("logging.level", default_log_level())
}
