//! Team entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};

/// Team identifier assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u64);

impl TeamId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TeamId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// Members are not stored on the team; they are the people whose team
/// reference points here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
}

impl Team {
    /// Build a stored team from its parts
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply validated changes
    pub fn apply(&mut self, changes: TeamChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validated input for creating a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    name: String,
}

impl NewTeam {
    pub fn new(name: &str) -> Result<Self, TeamValidationError> {
        Ok(Self {
            name: validate_team_name(name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated set of changes to an existing team
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamChanges {
    name: Option<String>,
}

impl TeamChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str) -> Result<Self, TeamValidationError> {
        self.name = Some(validate_team_name(name)?);
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_display_is_name() {
        let team = Team::new(TeamId::new(1), "Team 1");
        assert_eq!(team.to_string(), "Team 1");
        assert_eq!(team.id().value(), 1);
    }

    #[test]
    fn test_new_team_trims_name() {
        let new_team = NewTeam::new("  Team 1 ").unwrap();
        assert_eq!(new_team.name(), "Team 1");
    }

    #[test]
    fn test_new_team_invalid_name() {
        assert_eq!(NewTeam::new(""), Err(TeamValidationError::EmptyName));
    }

    #[test]
    fn test_apply_changes() {
        let mut team = Team::new(TeamId::new(1), "Team 1");
        let changes = TeamChanges::new().with_name("Updated Team 1").unwrap();

        team.apply(changes);
        assert_eq!(team.name(), "Updated Team 1");
    }

    #[test]
    fn test_apply_empty_changes() {
        let mut team = Team::new(TeamId::new(1), "Team 1");
        let changes = TeamChanges::new();
        assert!(changes.is_empty());

        team.apply(changes);
        assert_eq!(team.name(), "Team 1");
    }

    #[test]
    fn test_team_id_serializes_as_number() {
        let json = serde_json::to_string(&TeamId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
