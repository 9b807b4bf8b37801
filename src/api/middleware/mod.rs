//! API middleware components

pub mod caller;
pub mod logging;

pub use caller::CurrentCaller;
pub use logging::logging_middleware;
