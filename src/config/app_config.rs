use serde::Deserialize;

use crate::domain::account::Account;
use crate::domain::pagination::{PaginationSettings, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::infrastructure::roster::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Accounts allowed to call the API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Plaintext token granted administrator rights at startup
    pub admin_token: Option<String>,
    pub accounts: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub email: String,
    /// Hex SHA-256 digest of the account's bearer token
    pub token_sha256: String,
    #[serde(default)]
    pub is_staff: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl StorageSettings {
    /// Resolve the backend settings into a store configuration
    pub fn to_storage_config(&self) -> anyhow::Result<StorageConfig> {
        let backend = StorageType::from_str(&self.backend)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage backend: {}", self.backend))?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        anyhow::anyhow!("storage.database_url or DATABASE_URL is required")
                    })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl AuthConfig {
    /// Configured accounts, with digests normalized to lowercase
    pub fn to_accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .map(|account| {
                Account::new(&account.email, account.token_sha256.trim().to_ascii_lowercase())
                    .with_staff(account.is_staff)
            })
            .collect()
    }
}

impl PaginationConfig {
    pub fn to_settings(&self) -> PaginationSettings {
        PaginationSettings::new(self.page_size, self.max_page_size)
    }
}
