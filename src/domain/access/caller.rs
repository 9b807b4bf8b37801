//! Authenticated caller context

use crate::domain::account::Account;

/// The identity behind a request, passed explicitly into every service call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Caller {
    /// No credentials were presented
    #[default]
    Anonymous,
    /// A known account presented a valid token
    Account(Account),
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    pub fn account(account: Account) -> Self {
        Self::Account(account)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Account(_))
    }

    /// Check if the caller holds administrator privilege
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Account(account) => account.is_staff(),
        }
    }

    /// Identifier used in logs
    pub fn identifier(&self) -> String {
        match self {
            Self::Anonymous => "anonymous".to_string(),
            Self::Account(account) => format!("account:{}", account.email()),
        }
    }
}
