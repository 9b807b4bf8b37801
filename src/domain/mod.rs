//! Domain layer - Core roster entities, access rules and store contract

pub mod access;
pub mod account;
pub mod error;
pub mod pagination;
pub mod person;
pub mod roster;
pub mod team;

pub use error::DomainError;
