//! Bearer token generation and hashing
//!
//! Tokens are random URL-safe strings. Only their SHA-256 digest is ever
//! stored or configured.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// A freshly generated token and its digest
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// The bearer token (only shown once)
    pub token: String,
    /// Hex-encoded SHA-256 digest for configuration
    pub hash: String,
}

/// Generator for bearer tokens
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    prefix: String,
    token_bytes: usize,
}

impl TokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: 32,
        }
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    pub fn generate(&self) -> GeneratedToken {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let token = format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes));
        let hash = hash_token(&token);

        GeneratedToken { token, hash }
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new("rst_")
    }
}

/// Hex-encoded SHA-256 digest of a token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
