//! In-memory account registry

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::token::hash_token;
use crate::domain::account::{Account, AccountRegistry};
use crate::domain::DomainError;

/// Email of the account created for the bootstrap administrator token
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@localhost";

/// Accounts keyed by token digest
#[derive(Debug, Default)]
pub struct InMemoryAccountRegistry {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of accounts
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let map = accounts
            .into_iter()
            .map(|account| (account.token_hash().to_string(), account))
            .collect();

        Self {
            accounts: RwLock::new(map),
        }
    }

    /// Register an account, replacing any account with the same token
    pub fn register(&self, account: Account) -> Result<(), DomainError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|e| DomainError::internal(format!("Lock error: {}", e)))?;

        accounts.insert(account.token_hash().to_string(), account);
        Ok(())
    }

    /// Register a staff account for a plaintext bootstrap token
    pub fn register_admin_token(&self, token: &str) -> Result<(), DomainError> {
        self.register(Account::new(BOOTSTRAP_ADMIN_EMAIL, hash_token(token)).with_staff(true))
    }
}

#[async_trait]
impl AccountRegistry for InMemoryAccountRegistry {
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| DomainError::internal(format!("Lock error: {}", e)))?;

        Ok(accounts.get(&token_hash.to_ascii_lowercase()).cloned())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|e| DomainError::internal(format!("Lock error: {}", e)))?;

        Ok(accounts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_token_hash() {
        let hash = hash_token("user-token");
        let registry =
            InMemoryAccountRegistry::from_accounts([Account::new("user@test.com", hash.clone())]);

        let found = registry.find_by_token_hash(&hash).await.unwrap().unwrap();
        assert_eq!(found.email(), "user@test.com");
        assert!(!found.is_staff());

        let missing = registry.find_by_token_hash(&hash_token("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_lookup_ignores_hash_case() {
        let hash = hash_token("user-token");
        let registry = InMemoryAccountRegistry::from_accounts([Account::new(
            "user@test.com",
            hash.to_uppercase(),
        )]);

        assert!(registry.find_by_token_hash(&hash).await.unwrap().is_some());
        assert!(registry
            .find_by_token_hash(&hash.to_uppercase())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_register_admin_token() {
        let registry = InMemoryAccountRegistry::new();
        registry.register_admin_token("bootstrap").unwrap();

        let admin = registry
            .find_by_token_hash(&hash_token("bootstrap"))
            .await
            .unwrap()
            .unwrap();

        assert!(admin.is_staff());
        assert_eq!(admin.email(), BOOTSTRAP_ADMIN_EMAIL);
        assert_eq!(registry.count().await.unwrap(), 1);
    }
}
