//! Service configuration.
//!
//! Loaded in layers:
//! 1. defaults in code
//! 2. optional `config/stockroom.toml`
//! 3. environment overrides, `STOCKROOM_` prefix and `__` between sections
//!    (`STOCKROOM_SERVER__PORT=9000`)

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use stockroom_inventory::LedgerSettings;
use stockroom_observability::LogSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub ledger: LedgerSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HS256 secret for session tokens.
    pub jwt_secret: String,
}

/// Where inventory data comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Remote backend for [`crate::HttpInventoryStore`].
    pub base_url: Option<String>,
    /// Session token sent to the remote backend.
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// JSON dataset that seeds the in-memory store.
    pub fixture_path: Option<String>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: 10,
            fixture_path: None,
        }
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("auth.jwt_secret", "")
}

impl Settings {
    /// Load from `config/stockroom.toml` (optional) and the environment, then validate.
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = with_defaults()?
            .add_source(File::with_name("config/stockroom").required(false))
            .add_source(
                Environment::with_prefix("STOCKROOM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load from a TOML document over the defaults (no environment).
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = with_defaults()?
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set (STOCKROOM_AUTH__JWT_SECRET)".to_string(),
            ));
        }
        if self.ledger.default_threshold <= 0 {
            return Err(ConfigError::Message("ledger.default_threshold must be positive".to_string()));
        }
        if self.ledger.recent_limit == 0 {
            return Err(ConfigError::Message("ledger.recent_limit must be at least 1".to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Message("backend.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}
