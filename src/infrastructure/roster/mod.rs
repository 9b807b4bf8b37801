//! Roster store implementations

mod factory;
mod in_memory;
mod migrations;
mod postgres;

pub use factory::{RosterStoreFactory, StorageConfig, StorageType};
pub use in_memory::InMemoryRosterStore;
pub use migrations::{roster_migrations, Migration, PostgresMigrator};
pub use postgres::{PostgresConfig, PostgresRosterStore};
