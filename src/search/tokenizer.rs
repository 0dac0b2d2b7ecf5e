// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query normalization.

use std::collections::HashSet;

use super::matcher::normalize_words;

/// Character-length bounds a query must satisfy to produce terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBounds {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for QueryBounds {
    fn default() -> Self {
        Self {
            min_len: super::MIN_SEARCH_LENGTH,
            max_len: super::MAX_SEARCH_LENGTH,
        }
    }
}

impl QueryBounds {
    pub fn accepts(&self, query: &str) -> bool {
        let len = query.trim().chars().count();
        len >= self.min_len && len <= self.max_len
    }
}

/// Split `query` into lowercase terms.
///
/// Out-of-bounds queries produce no terms. Duplicates keep their first
/// position.
pub fn tokenize_query(query: &str, bounds: QueryBounds) -> Vec<String> {
    if !bounds.accepts(query) {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    normalize_words(query)
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_edge_punctuation() {
        let terms = tokenize_query("  \"Comedy,\"   GOLD!! (live) ", QueryBounds::default());
        assert_eq!(terms, vec!["comedy", "gold", "live"]);
    }

    #[test]
    fn keeps_inner_punctuation() {
        let terms = tokenize_query("don't stop rock'n'roll", QueryBounds::default());
        assert_eq!(terms, vec!["don't", "stop", "rock'n'roll"]);
    }

    #[test]
    fn rejects_out_of_bounds_queries() {
        assert!(tokenize_query("", QueryBounds::default()).is_empty());
        assert!(tokenize_query("a", QueryBounds::default()).is_empty());
        assert!(tokenize_query("   a   ", QueryBounds::default()).is_empty());
        assert!(tokenize_query(&"x".repeat(101), QueryBounds::default()).is_empty());
        assert_eq!(
            tokenize_query(&"x".repeat(100), QueryBounds::default()),
            vec!["x".repeat(100)]
        );
    }

    #[test]
    fn length_is_measured_in_characters() {
        let query = "é".repeat(100);
        assert_eq!(tokenize_query(&query, QueryBounds::default()).len(), 1);
    }

    #[test]
    fn drops_punctuation_only_words_and_duplicates() {
        let terms = tokenize_query("news -- News ... sports", QueryBounds::default());
        assert_eq!(terms, vec!["news", "sports"]);
    }

    #[test]
    fn keeps_trailing_combining_accent() {
        let terms = tokenize_query("cafe\u{301}", QueryBounds::default());
        assert_eq!(terms, vec!["cafe\u{301}"]);
    }

    #[test]
    fn tokenizing_normalized_output_is_idempotent() {
        let first = tokenize_query("The  History, of JAZZ!", QueryBounds::default());
        let second = tokenize_query(&first.join(" "), QueryBounds::default());
        assert_eq!(first, second);
    }
}
