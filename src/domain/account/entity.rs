//! Account entity

use serde::{Deserialize, Serialize};

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    email: String,
    /// Hex-encoded SHA-256 digest of the bearer token
    token_hash: String,
    is_staff: bool,
}

impl Account {
    pub fn new(email: impl Into<String>, token_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token_hash: token_hash.into().to_ascii_lowercase(),
            is_staff: false,
        }
    }

    /// Grant administrator privilege (builder pattern)
    pub fn with_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token_hash(&self) -> &str {
        &self.token_hash
    }

    pub fn is_staff(&self) -> bool {
        self.is_staff
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email)
    }
}
