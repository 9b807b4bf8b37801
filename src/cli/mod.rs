//! CLI module for the roster service
//!
//! - `serve`: run the HTTP API
//! - `token`: mint a bearer token for the configuration

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Roster API - teams and the people in them
#[derive(Parser)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Generate a bearer token and its SHA-256 digest
    Token(token::TokenArgs),
}
