//! Token command - prints a fresh bearer token and the digest to configure

use clap::Args;

use crate::infrastructure::auth::TokenGenerator;

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Prefix prepended to the random part of the token
    #[arg(long, default_value = "rst_")]
    pub prefix: String,
}

/// Generate a token and print it with its SHA-256 digest
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    let generated = TokenGenerator::new(args.prefix).generate();

    println!("token:        {}", generated.token);
    println!("token_sha256: {}", generated.hash);

    Ok(())
}
