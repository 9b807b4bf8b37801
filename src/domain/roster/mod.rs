//! Roster domain - the entity store over teams and people

mod query;
mod repository;
mod update;

pub use query::{PersonQuery, TeamQuery};
pub use repository::RosterStore;
pub use update::{UpdateMode, FIELD_REQUIRED};

#[cfg(test)]
pub use repository::MockRosterStore;
