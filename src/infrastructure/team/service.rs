//! Team service for team management

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::access::{AccessPolicy, Caller, Operation};
use crate::domain::pagination::{paginate, Page, PageRequest};
use crate::domain::person::Person;
use crate::domain::roster::{RosterStore, TeamQuery, UpdateMode, FIELD_REQUIRED};
use crate::domain::team::{NewTeam, Team, TeamChanges, TeamId};
use crate::domain::DomainError;

/// Request for creating a new team. A missing name is a validation error.
#[derive(Debug, Clone, Default)]
pub struct CreateTeamRequest {
    pub name: Option<String>,
}

/// Request for updating a team
#[derive(Debug, Clone, Default)]
pub struct UpdateTeamRequest {
    pub name: Option<String>,
}

/// A team together with its members, ordered by person id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub team: Team,
    pub members: Vec<Person>,
}

impl TeamRecord {
    pub fn new(team: Team, members: Vec<Person>) -> Self {
        Self { team, members }
    }
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService<S: RosterStore + ?Sized> {
    store: Arc<S>,
    policy: Arc<dyn AccessPolicy>,
}

impl<S: RosterStore + ?Sized> TeamService<S> {
    /// Create a new team service
    pub fn new(store: Arc<S>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { store, policy }
    }

    /// List teams matching the query, one page at a time
    pub async fn list(
        &self,
        caller: &Caller,
        query: &TeamQuery,
        page: &PageRequest,
    ) -> Result<Page<TeamRecord>, DomainError> {
        self.policy.authorize(Operation::List, caller)?;

        let teams = self.store.list_teams(query).await?;
        let page = paginate(teams, page)?;

        let ids: Vec<TeamId> = page.items().iter().map(Team::id).collect();
        let mut members = self.members_by_team(&ids).await?;

        debug!(
            count = page.items().len(),
            total = page.total(),
            page = page.number(),
            "Listed teams"
        );

        Ok(page.map(|team| {
            let team_members = members.remove(&team.id()).unwrap_or_default();
            TeamRecord::new(team, team_members)
        }))
    }

    /// Get a team and its members
    pub async fn get(&self, caller: &Caller, id: TeamId) -> Result<TeamRecord, DomainError> {
        self.policy.authorize(Operation::Retrieve, caller)?;

        let team = self.find(id).await?;
        self.hydrate(team).await
    }

    /// Create a new team
    pub async fn create(
        &self,
        caller: &Caller,
        request: CreateTeamRequest,
    ) -> Result<TeamRecord, DomainError> {
        self.policy.authorize(Operation::Create, caller)?;

        let name = request
            .name
            .ok_or_else(|| DomainError::invalid_field("name", FIELD_REQUIRED))?;
        let new_team = NewTeam::new(&name)?;

        info!(name = %new_team.name(), caller = %caller.identifier(), "Creating team");

        let team = self.store.create_team(new_team).await?;
        Ok(TeamRecord::new(team, Vec::new()))
    }

    /// Update a team. In `Full` mode the name must be present.
    pub async fn update(
        &self,
        caller: &Caller,
        id: TeamId,
        request: UpdateTeamRequest,
        mode: UpdateMode,
    ) -> Result<TeamRecord, DomainError> {
        self.policy.authorize(Operation::Update, caller)?;

        let existing = self.find(id).await?;

        let changes = match request.name {
            Some(name) => TeamChanges::new().with_name(&name)?,
            None if mode.is_partial() => TeamChanges::new(),
            None => return Err(DomainError::invalid_field("name", FIELD_REQUIRED)),
        };

        let team = if changes.is_empty() {
            existing
        } else {
            info!(id = %id, caller = %caller.identifier(), "Updating team");
            self.store.update_team(id, changes).await?
        };

        self.hydrate(team).await
    }

    /// Delete a team; its members stay, without a team
    pub async fn delete(&self, caller: &Caller, id: TeamId) -> Result<(), DomainError> {
        self.policy.authorize(Operation::Delete, caller)?;

        info!(id = %id, caller = %caller.identifier(), "Deleting team");

        if !self.store.delete_team(id).await? {
            return Err(not_found());
        }

        Ok(())
    }

    async fn find(&self, id: TeamId) -> Result<Team, DomainError> {
        self.store.get_team(id).await?.ok_or_else(not_found)
    }

    async fn hydrate(&self, team: Team) -> Result<TeamRecord, DomainError> {
        let members = self.store.find_members(&[team.id()]).await?;
        Ok(TeamRecord::new(team, members))
    }

    async fn members_by_team(
        &self,
        ids: &[TeamId],
    ) -> Result<HashMap<TeamId, Vec<Person>>, DomainError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut grouped: HashMap<TeamId, Vec<Person>> = HashMap::new();

        for person in self.store.find_members(ids).await? {
            if let Some(team_id) = person.team() {
                grouped.entry(team_id).or_default().push(person);
            }
        }

        Ok(grouped)
    }
}

fn not_found() -> DomainError {
    DomainError::not_found("No Team matches the given query.")
}
