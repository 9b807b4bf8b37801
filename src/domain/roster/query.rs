//! Query parameters for listing teams and people

use crate::domain::person::Person;
use crate::domain::team::Team;

/// Query parameters for listing teams
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamQuery {
    /// Case-insensitive substring of the team name
    pub name_contains: Option<String>,
}

impl TeamQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by name substring; blank values leave the query unfiltered
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_contains = normalize(name.into());
        self
    }

    pub fn matches(&self, team: &Team) -> bool {
        match &self.name_contains {
            Some(needle) => contains_ignore_case(team.name(), needle),
            None => true,
        }
    }
}

/// Query parameters for listing people
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonQuery {
    /// Case-insensitive substring of the last name
    pub last_name_contains: Option<String>,
}

impl PersonQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by last name substring; blank values leave the query unfiltered
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name_contains = normalize(last_name.into());
        self
    }

    pub fn matches(&self, person: &Person) -> bool {
        match &self.last_name_contains {
            Some(needle) => contains_ignore_case(person.last_name(), needle),
            None => true,
        }
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
