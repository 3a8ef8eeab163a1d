//! Server configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables with the `MIXTAPE_` prefix (e.g. `MIXTAPE_SERVER__PORT=4000`).

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub storage: StorageSection,
    pub auth: AuthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Root directory for uploaded media, served under `/media`
    pub media_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSection {
    pub jwt_secret: String,
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
}

impl ServerConfig {
    /// Load configuration from defaults, an optional file, and the environment
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("database.url", "sqlite://mixtape.db")?
            .set_default("storage.media_dir", "./media")?
            .set_default("auth.jwt_secret", "change-me-in-production")?
            .set_default("auth.access_token_hours", 24)?
            .set_default("auth.refresh_token_days", 30)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MIXTAPE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}
