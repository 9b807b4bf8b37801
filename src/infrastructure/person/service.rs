//! Person service for person management and team assignment

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::access::{AccessPolicy, Caller, Operation};
use crate::domain::pagination::{paginate, Page, PageRequest};
use crate::domain::person::{NewPerson, Person, PersonChanges, PersonId};
use crate::domain::roster::{PersonQuery, RosterStore, UpdateMode, FIELD_REQUIRED};
use crate::domain::team::{Team, TeamId};
use crate::domain::DomainError;

/// Request for creating a new person. Missing fields are validation errors.
#[derive(Debug, Clone, Default)]
pub struct CreatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Request for updating a person
#[derive(Debug, Clone, Default)]
pub struct UpdatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, DomainError> {
    value
        .as_deref()
        .ok_or_else(|| DomainError::invalid_field(field, FIELD_REQUIRED))
}

/// A person together with the team they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub person: Person,
    pub team: Option<Team>,
}

impl PersonRecord {
    pub fn new(person: Person, team: Option<Team>) -> Self {
        Self { person, team }
    }
}

/// Person service for managing people
#[derive(Debug)]
pub struct PersonService<S: RosterStore + ?Sized> {
    store: Arc<S>,
    policy: Arc<dyn AccessPolicy>,
}

impl<S: RosterStore + ?Sized> PersonService<S> {
    /// Create a new person service
    pub fn new(store: Arc<S>, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { store, policy }
    }

    /// List people matching the query, one page at a time
    pub async fn list(
        &self,
        caller: &Caller,
        query: &PersonQuery,
        page: &PageRequest,
    ) -> Result<Page<PersonRecord>, DomainError> {
        self.policy.authorize(Operation::List, caller)?;

        let people = self.store.list_people(query).await?;
        let page = paginate(people, page)?;

        let mut team_ids: Vec<TeamId> = page.items().iter().filter_map(Person::team).collect();
        team_ids.sort_unstable();
        team_ids.dedup();

        let teams: HashMap<TeamId, Team> = if team_ids.is_empty() {
            HashMap::new()
        } else {
            self.store
                .find_teams(&team_ids)
                .await?
                .into_iter()
                .map(|team| (team.id(), team))
                .collect()
        };

        debug!(
            count = page.items().len(),
            total = page.total(),
            page = page.number(),
            "Listed people"
        );

        Ok(page.map(|person| {
            let team = person.team().and_then(|id| teams.get(&id).cloned());
            PersonRecord::new(person, team)
        }))
    }

    /// Get a person and their team
    pub async fn get(&self, caller: &Caller, id: PersonId) -> Result<PersonRecord, DomainError> {
        self.policy.authorize(Operation::Retrieve, caller)?;

        let person = self.find(id).await?;

        let team = match person.team() {
            Some(team_id) => self.store.get_team(team_id).await?,
            None => None,
        };

        Ok(PersonRecord::new(person, team))
    }

    /// Create a new person, initially without a team
    pub async fn create(
        &self,
        caller: &Caller,
        request: CreatePersonRequest,
    ) -> Result<Person, DomainError> {
        self.policy.authorize(Operation::Create, caller)?;

        let new_person = NewPerson::new(
            required("first_name", &request.first_name)?,
            required("last_name", &request.last_name)?,
            required("email", &request.email)?,
        )?;

        info!(email = %new_person.email(), caller = %caller.identifier(), "Creating person");

        self.store.create_person(new_person).await
    }

    /// Update a person. In `Full` mode every field must be present.
    pub async fn update(
        &self,
        caller: &Caller,
        id: PersonId,
        request: UpdatePersonRequest,
        mode: UpdateMode,
    ) -> Result<Person, DomainError> {
        self.policy.authorize(Operation::Update, caller)?;

        let existing = self.find(id).await?;

        if !mode.is_partial() {
            required("first_name", &request.first_name)?;
            required("last_name", &request.last_name)?;
            required("email", &request.email)?;
        }

        let mut changes = PersonChanges::new();

        if let Some(first_name) = &request.first_name {
            changes = changes.with_first_name(first_name)?;
        }

        if let Some(last_name) = &request.last_name {
            changes = changes.with_last_name(last_name)?;
        }

        if let Some(email) = &request.email {
            changes = changes.with_email(email)?;
        }

        if changes.is_empty() {
            return Ok(existing);
        }

        info!(id = %id, caller = %caller.identifier(), "Updating person");

        self.store.update_person(id, changes).await
    }

    /// Set or clear the team a person belongs to
    pub async fn assign_team(
        &self,
        caller: &Caller,
        id: PersonId,
        team: Option<TeamId>,
    ) -> Result<Person, DomainError> {
        self.policy.authorize(Operation::AssignToTeam, caller)?;

        self.find(id).await?;

        info!(
            id = %id,
            team = ?team.map(|t| t.value()),
            caller = %caller.identifier(),
            "Assigning person to team"
        );

        self.store.assign_team(id, team).await
    }

    /// Delete a person
    pub async fn delete(&self, caller: &Caller, id: PersonId) -> Result<(), DomainError> {
        self.policy.authorize(Operation::Delete, caller)?;

        info!(id = %id, caller = %caller.identifier(), "Deleting person");

        if !self.store.delete_person(id).await? {
            return Err(not_found());
        }

        Ok(())
    }

    async fn find(&self, id: PersonId) -> Result<Person, DomainError> {
        self.store.get_person(id).await?.ok_or_else(not_found)
    }
}

fn not_found() -> DomainError {
    DomainError::not_found("No Person matches the given query.")
}
