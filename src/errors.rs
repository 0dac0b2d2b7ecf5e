// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! The search pipeline itself never fails; these cover loading the catalog
//! it searches.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "Catalog not found at '{}'\n\n\
         Suggestion: pass --catalog <PATH> or set `catalog = \"...\"` in .rewindrc.toml.\n\
         Example: rewind search comedy --catalog ./catalog.json",
        .path.display()
    )]
    NotFound { path: PathBuf },

    #[error("Failed to read catalog '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Catalog '{}' is not valid JSON: {source}\n\n\
         Expected an object with `podcasts` and `episodes` arrays.",
        .path.display()
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Hint shown when a search returns nothing.
    pub fn no_results_suggestion(query: &str, min_len: usize, max_len: usize) -> String {
        let len = query.trim().chars().count();
        if len < min_len || len > max_len {
            return format!(
                "No results: queries must be {min_len}-{max_len} characters (got {len})"
            );
        }
        format!(
            "No results found for '{}'\n\n\
             Try:\n\
             - Fewer or broader terms\n\
             - --match-mode substring to match inside words\n\
             - Dropping --podcast to search every show",
            query.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_path_and_fix() {
        let err = CatalogError::NotFound {
            path: PathBuf::from("missing.json"),
        };
        let message = err.to_string();
        assert!(message.contains("missing.json"));
        assert!(message.contains("--catalog"));
    }

    #[test]
    fn no_results_suggestion_explains_length_bounds() {
        let message = suggestions::no_results_suggestion("a", 2, 100);
        assert!(message.contains("2-100"));
        let message = suggestions::no_results_suggestion("comedy", 2, 100);
        assert!(message.contains("'comedy'"));
    }
}
