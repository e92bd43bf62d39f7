//! cpak - recipe-driven build and packaging CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cpak_cli::cmd;
use cpak_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { profile } => cmd::build::build(&cli.path, &profile),
        Commands::Package { profile, existing } => {
            cmd::package::package(&cli.path, &profile, existing)
        }
        Commands::Export => cmd::export::export(&cli.path),
        Commands::Check => cmd::check::check(&cli.path),
    }
}
