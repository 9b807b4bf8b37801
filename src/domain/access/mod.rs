//! Access control - who may perform which operation

mod caller;
mod policy;

pub use caller::Caller;
pub use policy::{AccessPolicy, AdminOrReadOnly, Operation};
