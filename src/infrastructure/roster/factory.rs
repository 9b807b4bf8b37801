//! Roster store factory for runtime backend selection

use std::sync::Arc;

use tracing::info;

use crate::domain::roster::RosterStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryRosterStore;
use super::postgres::{PostgresConfig, PostgresRosterStore};

/// Supported storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for roster store instances
#[derive(Debug)]
pub struct RosterStoreFactory;

impl RosterStoreFactory {
    /// Create the configured store. The PostgreSQL backend connects and
    /// migrates before returning.
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn RosterStore>, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory roster store");
                Ok(Arc::new(InMemoryRosterStore::new()))
            }
            StorageConfig::Postgres(pg_config) => {
                info!(
                    max_connections = pg_config.max_connections,
                    "Using PostgreSQL roster store"
                );
                let store = PostgresRosterStore::connect(pg_config).await?;
                Ok(Arc::new(store))
            }
        }
    }
}
