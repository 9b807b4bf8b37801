//! Person infrastructure implementations

mod service;

pub use service::{CreatePersonRequest, PersonRecord, PersonService, UpdatePersonRequest};
