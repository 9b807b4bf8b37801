//! Team validation

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),
}

impl TeamValidationError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong(_) => "name",
        }
    }
}

impl From<TeamValidationError> for DomainError {
    fn from(err: TeamValidationError) -> Self {
        DomainError::invalid_field(err.field(), err.to_string())
    }
}

pub const MAX_TEAM_NAME_LENGTH: usize = 255;

/// Validate a team name, returning the trimmed value
pub fn validate_team_name(name: &str) -> Result<String, TeamValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(name.to_string())
}
