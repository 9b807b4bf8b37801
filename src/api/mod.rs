//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod people;
pub mod router;
pub mod state;
pub mod teams;
pub mod types;
pub mod views;

pub use router::create_router_with_state;
pub use state::AppState;
