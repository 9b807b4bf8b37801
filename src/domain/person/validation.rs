//! Person validation

use thiserror::Error;
use validator::ValidateEmail;

use crate::domain::DomainError;

/// Errors that can occur during person validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PersonValidationError {
    #[error("First name cannot be empty")]
    EmptyFirstName,

    #[error("First name cannot exceed {0} characters")]
    FirstNameTooLong(usize),

    #[error("Last name cannot be empty")]
    EmptyLastName,

    #[error("Last name cannot exceed {0} characters")]
    LastNameTooLong(usize),

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email cannot exceed {0} characters")]
    EmailTooLong(usize),

    #[error("Enter a valid email address")]
    InvalidEmail,
}

impl PersonValidationError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName | Self::FirstNameTooLong(_) => "first_name",
            Self::EmptyLastName | Self::LastNameTooLong(_) => "last_name",
            Self::EmptyEmail | Self::EmailTooLong(_) | Self::InvalidEmail => "email",
        }
    }
}

impl From<PersonValidationError> for DomainError {
    fn from(err: PersonValidationError) -> Self {
        DomainError::invalid_field(err.field(), err.to_string())
    }
}

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validate a first name, returning the trimmed value
pub fn validate_first_name(name: &str) -> Result<String, PersonValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(PersonValidationError::EmptyFirstName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(PersonValidationError::FirstNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(name.to_string())
}

/// Validate a last name, returning the trimmed value
pub fn validate_last_name(name: &str) -> Result<String, PersonValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(PersonValidationError::EmptyLastName);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(PersonValidationError::LastNameTooLong(MAX_NAME_LENGTH));
    }

    Ok(name.to_string())
}

/// Validate an email address, returning the trimmed value
pub fn validate_email(email: &str) -> Result<String, PersonValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(PersonValidationError::EmptyEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(PersonValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !email.validate_email() {
        return Err(PersonValidationError::InvalidEmail);
    }

    Ok(email.to_string())
}
