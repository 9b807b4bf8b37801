//! Roster API
//!
//! A small HTTP service managing teams and the people in them:
//! - Public reads with page-number pagination and name filters
//! - Writes restricted to administrator accounts
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::account::AccountRegistry;
use infrastructure::auth::InMemoryAccountRegistry;
use infrastructure::roster::RosterStoreFactory;
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.storage.to_storage_config()?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    let store = RosterStoreFactory::create(&storage_config).await?;

    let accounts = create_account_registry(config).await?;
    let pagination = config.pagination.to_settings();

    Ok(AppState::new(store, accounts, pagination))
}

async fn create_account_registry(config: &AppConfig) -> anyhow::Result<Arc<dyn AccountRegistry>> {
    let registry = InMemoryAccountRegistry::from_accounts(config.auth.to_accounts());

    if let Some(token) = config.auth.admin_token.as_deref().filter(|t| !t.is_empty()) {
        registry.register_admin_token(token)?;
        info!("Bootstrap administrator token registered");
    }

    let count = registry.count().await?;
    if count == 0 {
        warn!("No accounts configured, every write request will be rejected");
    } else {
        info!(accounts = count, "Account registry loaded");
    }

    Ok(Arc::new(registry))
}
