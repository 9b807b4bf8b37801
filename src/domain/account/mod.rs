//! Account domain module
//!
//! Accounts are the authenticated identities behind bearer tokens. Account
//! management itself happens outside this service; accounts are loaded from
//! configuration.

mod entity;
mod repository;

pub use entity::Account;
pub use repository::AccountRegistry;
