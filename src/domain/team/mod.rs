//! Team domain module
//!
//! Teams group people. A team's members are derived from the people that
//! reference it.

mod entity;
mod validation;

pub use entity::{NewTeam, Team, TeamChanges, TeamId};
pub use validation::{validate_team_name, TeamValidationError, MAX_TEAM_NAME_LENGTH};
