// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relevance-scored episode search.
//!
//! Pipeline: [`tokenizer`] normalizes the query, [`scorer`] weights field
//! matches and adds a recency bonus, [`highlight`] marks matched terms, and
//! [`assemble`] sorts and paginates into a [`SearchResponse`].

pub mod assemble;
pub mod engine;
pub mod highlight;
pub mod matcher;
pub mod scorer;
pub mod tokenizer;
mod types;
pub mod weights;

pub use engine::{search, SearchEngine, SearchSettings};
pub use highlight::Highlighter;
pub use scorer::{MatchMode, RecencyPolicy, Scorer};
pub use types::*;
pub use weights::{FieldWeight, FieldWeights};
