//! Entity store trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::query::{PersonQuery, TeamQuery};
use crate::domain::person::{NewPerson, Person, PersonChanges, PersonId};
use crate::domain::team::{NewTeam, Team, TeamChanges, TeamId};
use crate::domain::DomainError;

/// Persistence for teams, people and the person → team reference
///
/// Implementations enforce team name and person email uniqueness at write
/// time and return `DomainError::Validation` (with the offending field) on
/// violation, leaving the store unchanged. Listings are ordered by id.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RosterStore: Send + Sync + std::fmt::Debug {
    /// Create a team, assigning its id
    async fn create_team(&self, team: NewTeam) -> Result<Team, DomainError>;

    /// Get a team by ID
    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError>;

    /// List teams matching the query
    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError>;

    /// Fetch the teams with the given ids, ordered by id
    async fn find_teams(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError>;

    /// Apply changes to an existing team
    async fn update_team(&self, id: TeamId, changes: TeamChanges) -> Result<Team, DomainError>;

    /// Delete a team, clearing the team reference of all its members in the
    /// same atomic step. Returns false if the team does not exist.
    async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError>;

    /// Create a person with no team, assigning its id
    async fn create_person(&self, person: NewPerson) -> Result<Person, DomainError>;

    /// Get a person by ID
    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DomainError>;

    /// List people matching the query
    async fn list_people(&self, query: &PersonQuery) -> Result<Vec<Person>, DomainError>;

    /// People belonging to any of the given teams, ordered by id
    async fn find_members(&self, team_ids: &[TeamId]) -> Result<Vec<Person>, DomainError>;

    /// Apply changes to an existing person
    async fn update_person(
        &self,
        id: PersonId,
        changes: PersonChanges,
    ) -> Result<Person, DomainError>;

    /// Set or clear a person's team. Fails with a validation error on
    /// `team` when the referenced team does not exist.
    async fn assign_team(
        &self,
        id: PersonId,
        team: Option<TeamId>,
    ) -> Result<Person, DomainError>;

    /// Delete a person. Returns false if the person does not exist.
    async fn delete_person(&self, id: PersonId) -> Result<bool, DomainError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
