//! In-memory roster store

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::person::{NewPerson, Person, PersonChanges, PersonId};
use crate::domain::roster::{PersonQuery, RosterStore, TeamQuery};
use crate::domain::team::{NewTeam, Team, TeamChanges, TeamId};
use crate::domain::DomainError;

/// Both tables plus their id sequences, guarded by a single lock so that
/// cross-entity writes (team deletion) are atomic.
#[derive(Debug)]
struct Tables {
    teams: BTreeMap<TeamId, Team>,
    people: BTreeMap<PersonId, Person>,
    next_team_id: u64,
    next_person_id: u64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            teams: BTreeMap::new(),
            people: BTreeMap::new(),
            next_team_id: 1,
            next_person_id: 1,
        }
    }
}

impl Tables {
    fn ensure_team_name_free(&self, name: &str, except: Option<TeamId>) -> Result<(), DomainError> {
        let taken = self
            .teams
            .values()
            .any(|team| team.name() == name && Some(team.id()) != except);

        if taken {
            return Err(DomainError::invalid_field(
                "name",
                "team with this name already exists.",
            ));
        }

        Ok(())
    }

    fn ensure_email_free(&self, email: &str, except: Option<PersonId>) -> Result<(), DomainError> {
        let taken = self
            .people
            .values()
            .any(|person| person.email() == email && Some(person.id()) != except);

        if taken {
            return Err(DomainError::invalid_field(
                "email",
                "person with this email already exists.",
            ));
        }

        Ok(())
    }
}

/// Thread-safe in-memory roster store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    tables: RwLock<Tables>,
}

impl InMemoryRosterStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl RosterStore for InMemoryRosterStore {
    async fn create_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut tables = self.write()?;
        tables.ensure_team_name_free(team.name(), None)?;

        let id = TeamId::new(tables.next_team_id);
        tables.next_team_id += 1;

        let team = Team::new(id, team.name());
        tables.teams.insert(id, team.clone());
        Ok(team)
    }

    async fn get_team(&self, id: TeamId) -> Result<Option<Team>, DomainError> {
        Ok(self.read()?.teams.get(&id).cloned())
    }

    async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .teams
            .values()
            .filter(|team| query.matches(team))
            .cloned()
            .collect())
    }

    async fn find_teams(&self, ids: &[TeamId]) -> Result<Vec<Team>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .teams
            .values()
            .filter(|team| ids.contains(&team.id()))
            .cloned()
            .collect())
    }

    async fn update_team(&self, id: TeamId, changes: TeamChanges) -> Result<Team, DomainError> {
        let mut tables = self.write()?;

        if !tables.teams.contains_key(&id) {
            return Err(DomainError::not_found(format!("Team {} not found", id)));
        }

        if let Some(name) = changes.name() {
            tables.ensure_team_name_free(name, Some(id))?;
        }

        let team = tables
            .teams
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Team {} not found", id)))?;

        team.apply(changes);
        Ok(team.clone())
    }

    async fn delete_team(&self, id: TeamId) -> Result<bool, DomainError> {
        let mut tables = self.write()?;

        if !tables.teams.contains_key(&id) {
            return Ok(false);
        }

        for person in tables.people.values_mut() {
            if person.team() == Some(id) {
                person.set_team(None);
            }
        }

        Ok(tables.teams.remove(&id).is_some())
    }

    async fn create_person(&self, person: NewPerson) -> Result<Person, DomainError> {
        let mut tables = self.write()?;
        tables.ensure_email_free(person.email(), None)?;

        let id = PersonId::new(tables.next_person_id);
        tables.next_person_id += 1;

        let person = Person::from_new(id, person);
        tables.people.insert(id, person.clone());
        Ok(person)
    }

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, DomainError> {
        Ok(self.read()?.people.get(&id).cloned())
    }

    async fn list_people(&self, query: &PersonQuery) -> Result<Vec<Person>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .people
            .values()
            .filter(|person| query.matches(person))
            .cloned()
            .collect())
    }

    async fn find_members(&self, team_ids: &[TeamId]) -> Result<Vec<Person>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .people
            .values()
            .filter(|person| person.team().is_some_and(|team| team_ids.contains(&team)))
            .cloned()
            .collect())
    }

    async fn update_person(
        &self,
        id: PersonId,
        changes: PersonChanges,
    ) -> Result<Person, DomainError> {
        let mut tables = self.write()?;

        if !tables.people.contains_key(&id) {
            return Err(DomainError::not_found(format!("Person {} not found", id)));
        }

        if let Some(email) = changes.email() {
            tables.ensure_email_free(email, Some(id))?;
        }

        let person = tables
            .people
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Person {} not found", id)))?;

        person.apply(changes);
        Ok(person.clone())
    }

    async fn assign_team(
        &self,
        id: PersonId,
        team: Option<TeamId>,
    ) -> Result<Person, DomainError> {
        let mut tables = self.write()?;

        if !tables.people.contains_key(&id) {
            return Err(DomainError::not_found(format!("Person {} not found", id)));
        }

        if let Some(team_id) = team {
            if !tables.teams.contains_key(&team_id) {
                return Err(DomainError::invalid_field(
                    "team",
                    format!("Invalid pk \"{}\" - object does not exist.", team_id),
                ));
            }
        }

        let person = tables
            .people
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("Person {} not found", id)))?;

        person.set_team(team);
        Ok(person.clone())
    }

    async fn delete_person(&self, id: PersonId) -> Result<bool, DomainError> {
        Ok(self.write()?.people.remove(&id).is_some())
    }
}
