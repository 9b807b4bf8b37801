//! Person entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{
    validate_email, validate_first_name, validate_last_name, PersonValidationError,
};
use crate::domain::team::TeamId;

/// Person identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(u64);

impl PersonId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Person entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<TeamId>,
}

impl Person {
    /// Build a stored person from its parts
    pub fn new(
        id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            team: None,
        }
    }

    /// Build a stored person from a validated create request
    pub fn from_new(id: PersonId, new_person: NewPerson) -> Self {
        Self::new(
            id,
            new_person.first_name,
            new_person.last_name,
            new_person.email,
        )
    }

    /// Set team reference (builder pattern)
    pub fn with_team(mut self, team: Option<TeamId>) -> Self {
        self.team = team;
        self
    }

    // Getters

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    /// "First Last", the string used wherever a person is listed as text
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    // Mutators

    /// Apply validated changes
    pub fn apply(&mut self, changes: PersonChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }

        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }

        if let Some(email) = changes.email {
            self.email = email;
        }
    }

    /// Replace or clear the team reference
    pub fn set_team(&mut self, team: Option<TeamId>) {
        self.team = team;
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Validated input for creating a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    first_name: String,
    last_name: String,
    email: String,
}

impl NewPerson {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Self, PersonValidationError> {
        Ok(Self {
            first_name: validate_first_name(first_name)?,
            last_name: validate_last_name(last_name)?,
            email: validate_email(email)?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Validated set of changes to an existing person
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl PersonChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_name(mut self, value: &str) -> Result<Self, PersonValidationError> {
        self.first_name = Some(validate_first_name(value)?);
        Ok(self)
    }

    pub fn with_last_name(mut self, value: &str) -> Result<Self, PersonValidationError> {
        self.last_name = Some(validate_last_name(value)?);
        Ok(self)
    }

    pub fn with_email(mut self, value: &str) -> Result<Self, PersonValidationError> {
        self.email = Some(validate_email(value)?);
        Ok(self)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}
