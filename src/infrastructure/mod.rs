//! Infrastructure layer - Store backends, authentication and services

pub mod auth;
pub mod logging;
pub mod person;
pub mod roster;
pub mod team;
