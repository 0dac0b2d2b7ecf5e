// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use rewind_search::search::MatchMode;

/// rewind - Episode search for the Rewind podcast catalog
///
/// Scores episodes by weighted field matches plus a recency bonus and
/// highlights the matched terms.
#[derive(Parser, Debug)]
#[command(name = "rewind")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Search quickstart:\n  rewind s comedy --catalog catalog.json\n  rewind search \"jazz history\" -m 5 --offset 5\n  rewind --format json search interview --podcast p1"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How query terms are matched against episode fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliMatchMode {
    /// Case-insensitive substring match (default)
    Substring,
    /// Whole-word match only
    Word,
}

impl From<CliMatchMode> for MatchMode {
    fn from(mode: CliMatchMode) -> Self {
        match mode {
            CliMatchMode::Substring => MatchMode::Substring,
            CliMatchMode::Word => MatchMode::Word,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search episodes by title, guests, description, tags and podcast title
    #[command(
        visible_aliases = ["s", "find"],
        after_help = "Examples:\n  rewind s comedy\n  rewind search \"true crime\" --podcast p7 -m 3\n  rewind search jazz --explain --now 2024-06-01T00:00:00Z"
    )]
    Search {
        /// Search query (2-100 characters)
        query: String,

        /// Catalog JSON file (defaults to config `catalog`, then ./catalog.json)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Maximum number of results (1-100, default 20)
        #[arg(short = 'm', long = "limit")]
        limit: Option<i64>,

        /// Number of ranked results to skip
        #[arg(short, long)]
        offset: Option<i64>,

        /// Only search episodes of this podcast id
        #[arg(short, long = "podcast")]
        podcast: Option<String>,

        /// Term matching policy (overrides config)
        #[arg(short = 'M', long, value_enum)]
        match_mode: Option<CliMatchMode>,

        /// Reference time for the recency bonus (RFC 3339, default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Include per-field score breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Show the effective field weight table
    #[command(visible_aliases = ["w"])]
    Weights,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
