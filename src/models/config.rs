use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const CONFIG_DIR: &str = "config";

/// Configuration options for the catalog service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP__*` environment variables, in that order.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Single allowed origin, or `*` for any origin.
    pub cors_origin: String,
    /// Maximum accepted size of an uploaded image, in bytes.
    pub upload_limit: usize,
    pub smtp: SmtpConfig,
    pub storage: StorageConfig,
}

/// Outbound mail settings used for category notifications.
#[derive(Clone, Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Use an implicit TLS relay; plain SMTP otherwise (local dev servers).
    pub use_tls: bool,
    pub from: String,
    /// Recipient of every notification.
    pub to: String,
    pub timeout_secs: u64,
}

/// Remote object storage used for product images.
#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    /// Base URL objects are `PUT` to.
    pub upload_url: String,
    /// Base URL objects are publicly served from.
    pub public_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Reads the layered configuration. `APP_ENV` selects the optional
    /// environment file; nested keys are overridden as `APP__SMTP__HOST`.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/default")))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
