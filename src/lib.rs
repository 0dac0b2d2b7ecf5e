// SPDX-License-Identifier: MIT OR Apache-2.0

//! rewind-search - Relevance-scored episode search for Rewind
//!
//! Shared modules for the `rewind` CLI tool.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod output;
pub mod search;

pub use search::{search, SearchEngine, SearchQuery, SearchResponse, SearchableEpisode};
