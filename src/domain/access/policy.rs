//! Access policy

use super::caller::Caller;
use crate::domain::DomainError;

/// Operations exposed by the team and person resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
    AssignToTeam,
}

impl Operation {
    /// Read operations never change state
    pub fn is_read(&self) -> bool {
        matches!(self, Self::List | Self::Retrieve)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Retrieve => "retrieve",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::AssignToTeam => "assign_to_team",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides whether a caller may perform an operation
pub trait AccessPolicy: Send + Sync + std::fmt::Debug {
    fn authorize(&self, operation: Operation, caller: &Caller) -> Result<(), DomainError>;
}

/// Reads are public, writes require administrator privilege
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminOrReadOnly;

impl AccessPolicy for AdminOrReadOnly {
    fn authorize(&self, operation: Operation, caller: &Caller) -> Result<(), DomainError> {
        if operation.is_read() || caller.is_admin() {
            return Ok(());
        }

        Err(DomainError::forbidden(
            "You do not have permission to perform this action.",
        ))
    }
}
