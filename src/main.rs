// SPDX-License-Identifier: MIT OR Apache-2.0

//! rewind - Episode search for the Rewind podcast catalog
//!
//! Loads a podcast/episode catalog and ranks episodes by weighted field
//! matches plus a recency bonus.

mod cli;
mod query;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("REWIND_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();

    match cli.command {
        Commands::Search {
            query,
            catalog,
            limit,
            offset,
            podcast,
            match_mode,
            now,
            explain,
        } => {
            query::search::run(
                query::search::SearchArgs {
                    query: &query,
                    catalog: catalog.as_deref(),
                    limit,
                    offset,
                    podcast: podcast.as_deref(),
                    match_mode,
                    now,
                    explain,
                },
                format,
                cli.compact,
            )?;
        }
        Commands::Weights => {
            query::weights::run(format, cli.compact)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "rewind", &mut std::io::stdout());
        }
    }

    Ok(())
}
