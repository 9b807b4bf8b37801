//! Account registry trait

use async_trait::async_trait;

use super::entity::Account;
use crate::domain::DomainError;

/// Lookup of accounts by bearer token digest
#[async_trait]
pub trait AccountRegistry: Send + Sync + std::fmt::Debug {
    /// Find the account owning the token with the given hex SHA-256 digest
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Account>, DomainError>;

    /// Number of registered accounts
    async fn count(&self) -> Result<usize, DomainError>;
}
