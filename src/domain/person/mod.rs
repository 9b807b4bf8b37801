//! Person domain module

mod entity;
mod validation;

pub use entity::{NewPerson, Person, PersonChanges, PersonId};
pub use validation::{
    validate_email, validate_first_name, validate_last_name, PersonValidationError,
    MAX_EMAIL_LENGTH, MAX_NAME_LENGTH,
};
