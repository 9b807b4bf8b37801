//! Authentication infrastructure module
//!
//! Bearer token generation and hashing, plus the account registry that
//! resolves token digests to accounts.

mod registry;
mod token;

pub use registry::{InMemoryAccountRegistry, BOOTSTRAP_ADMIN_EMAIL};
pub use token::{hash_token, GeneratedToken, TokenGenerator};
