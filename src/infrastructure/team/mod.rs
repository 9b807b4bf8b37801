//! Team infrastructure implementations

mod service;

pub use service::{CreateTeamRequest, TeamRecord, TeamService, UpdateTeamRequest};
