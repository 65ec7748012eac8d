use crate::auth::config::AuthConfig;
use crate::database::config::DatabaseConfig;
use crate::server::config::ServerConfig;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_level")]
    pub level: String,
    #[serde(default = "default_log_request")]
    pub log_request: bool,
}

fn default_logging_level() -> String {
    "info".to_string()
}

fn default_log_request() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            log_request: default_log_request(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, an optional `config.yaml` in the
    /// working directory, and `PROPERTY_*` environment overrides
    /// (e.g. `PROPERTY_AUTH__TOKEN`, `PROPERTY_DATABASE__URL`).
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(config::Config::try_from(&Config::default())?);

        if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("PROPERTY")
                .prefix_separator("_")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }

    /// Load configuration from an explicit file, still honoring
    /// environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = ConfigBuilder::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROPERTY")
                    .prefix_separator("_")
                    .separator("__"),
            );

        builder.build()?.try_deserialize()
    }
}
