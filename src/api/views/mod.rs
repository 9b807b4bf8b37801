//! Output shapes for teams and people
//!
//! Each resource has a fixed set of shapes and an explicit mapping from
//! operation to shape. Rendering is pure: services load the related data
//! (members, referenced team) before a record reaches this module.

mod person;
mod team;

pub use person::{
    AssignmentView, PersonDetailView, PersonListView, PersonShape, PersonSummary, PersonView,
};
pub use team::{TeamDetailView, TeamListView, TeamShape, TeamSummary, TeamView};
