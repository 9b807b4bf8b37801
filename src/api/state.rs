//! Application state for shared services

use std::sync::Arc;

use crate::domain::access::{AccessPolicy, AdminOrReadOnly, Caller, Operation};
use crate::domain::account::AccountRegistry;
use crate::domain::pagination::PaginationSettings;
use crate::domain::roster::RosterStore;
use crate::domain::DomainError;
use crate::infrastructure::person::PersonService;
use crate::infrastructure::team::TeamService;

/// Application state containing shared services
#[derive(Debug, Clone)]
pub struct AppState {
    pub team_service: Arc<TeamService<dyn RosterStore>>,
    pub person_service: Arc<PersonService<dyn RosterStore>>,
    pub accounts: Arc<dyn AccountRegistry>,
    pub store: Arc<dyn RosterStore>,
    pub pagination: PaginationSettings,
    policy: Arc<dyn AccessPolicy>,
}

impl AppState {
    /// Build the services over a store, guarded by the admin-or-read-only policy
    pub fn new(
        store: Arc<dyn RosterStore>,
        accounts: Arc<dyn AccountRegistry>,
        pagination: PaginationSettings,
    ) -> Self {
        Self::with_policy(store, accounts, pagination, Arc::new(AdminOrReadOnly))
    }

    /// Build the services with an explicit access policy
    pub fn with_policy(
        store: Arc<dyn RosterStore>,
        accounts: Arc<dyn AccountRegistry>,
        pagination: PaginationSettings,
        policy: Arc<dyn AccessPolicy>,
    ) -> Self {
        Self {
            team_service: Arc::new(TeamService::new(store.clone(), policy.clone())),
            person_service: Arc::new(PersonService::new(store.clone(), policy.clone())),
            accounts,
            store,
            pagination,
            policy,
        }
    }

    /// Check an operation against the policy the services enforce. Write
    /// handlers call this before reading the request body.
    pub fn authorize(&self, operation: Operation, caller: &Caller) -> Result<(), DomainError> {
        self.policy.authorize(operation, caller)
    }
}
