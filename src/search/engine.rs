// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `search` operation: tokenize, score, highlight, assemble.

use chrono::{DateTime, Utc};
use std::time::Instant;

use super::assemble::{assemble, elapsed_ms, Page};
use super::highlight::{Highlighter, DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
use super::scorer::{MatchMode, RecencyPolicy, Scorer};
use super::tokenizer::{tokenize_query, QueryBounds};
use super::{
    FieldWeights, SearchQuery, SearchResponse, SearchResult, SearchableEpisode, DEFAULT_LIMIT,
    MAX_LIMIT,
};

/// Tunables for a [`SearchEngine`]. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub bounds: QueryBounds,
    pub default_limit: usize,
    pub max_limit: usize,
    pub weights: FieldWeights,
    pub recency: RecencyPolicy,
    pub match_mode: MatchMode,
    pub highlight_open: String,
    pub highlight_close: String,
    /// Attach per-field score breakdowns to each result.
    pub explain: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            bounds: QueryBounds::default(),
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            weights: FieldWeights::default(),
            recency: RecencyPolicy::default(),
            match_mode: MatchMode::default(),
            highlight_open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
            explain: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchEngine {
    scorer: Scorer,
    highlighter: Highlighter,
    bounds: QueryBounds,
    default_limit: usize,
    max_limit: usize,
    explain: bool,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

impl SearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            scorer: Scorer::new(settings.weights, settings.recency, settings.match_mode),
            highlighter: Highlighter::new(
                settings.highlight_open,
                settings.highlight_close,
                settings.match_mode,
            ),
            bounds: settings.bounds,
            default_limit: settings.default_limit,
            max_limit: settings.max_limit,
            explain: settings.explain,
        }
    }

    pub fn weights(&self) -> &FieldWeights {
        self.scorer.weights()
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Search `candidates` using the current time for recency.
    pub fn search(&self, query: &SearchQuery, candidates: &[SearchableEpisode]) -> SearchResponse {
        self.search_at(query, candidates, Utc::now())
    }

    /// Search with an explicit clock.
    pub fn search_at(
        &self,
        query: &SearchQuery,
        candidates: &[SearchableEpisode],
        now: DateTime<Utc>,
    ) -> SearchResponse {
        let started = Instant::now();
        let terms = tokenize_query(&query.query, self.bounds);
        if terms.is_empty() {
            tracing::debug!(query = %query.query, "query outside length bounds or empty");
            return SearchResponse::empty(elapsed_ms(started));
        }

        let scope = query.podcast_id.as_deref();
        let mut matches = Vec::new();
        for candidate in candidates {
            if let Some(scope) = scope {
                if candidate.podcast_id.as_deref() != Some(scope) {
                    continue;
                }
            }
            let mut score = self.scorer.score(&terms, candidate, now);
            if !score.is_match() {
                continue;
            }
            for (field, field_terms) in &score.matched_terms {
                if let Some(text) = candidate.field_text(*field) {
                    score
                        .highlights
                        .insert(*field, self.highlighter.highlight(&text, field_terms));
                }
            }
            if !self.explain {
                score.explain = None;
            }
            matches.push(SearchResult::build(candidate, score));
        }

        let page = Page {
            offset: query.effective_offset(),
            limit: query.effective_limit(self.default_limit, self.max_limit),
        };
        let response = assemble(matches, page, started);
        tracing::debug!(
            query = %query.query,
            terms = terms.len(),
            candidates = candidates.len(),
            total = response.total,
            returned = response.results.len(),
            search_time_ms = response.search_time,
            "search complete"
        );
        response
    }
}

/// Search with default settings.
pub fn search(query: &SearchQuery, candidates: &[SearchableEpisode]) -> SearchResponse {
    SearchEngine::default().search(query, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchField;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn episode(id: &str, podcast: &str, title: &str) -> SearchableEpisode {
        let mut episode = SearchableEpisode {
            id: id.to_string(),
            podcast_id: Some(podcast.to_string()),
            title: Some(title.to_string()),
            podcast_title: Some(format!("Show {podcast}")),
            ..SearchableEpisode::default()
        };
        episode.refresh_searchable_text();
        episode
    }

    #[test]
    fn comedy_example_matches_only_comedy_title() {
        let candidates = vec![
            episode("a", "p1", "Classic Comedy Gold"),
            episode("b", "p1", "Drama Talk"),
        ];
        let response =
            SearchEngine::default().search_at(&SearchQuery::new("comedy"), &candidates, now());
        assert_eq!(response.total, 1);
        let hit = &response.results[0];
        assert_eq!(hit.episode.id, "a");
        assert!(hit.relevance.matched_fields.contains(&SearchField::Title));
        assert_eq!(
            hit.relevance.highlights[&SearchField::Title],
            "Classic <mark>Comedy</mark> Gold"
        );
        assert!(!hit.relevance.highlights.contains_key(&SearchField::PodcastTitle));
        assert!(hit.relevance.explain.is_none());
    }

    #[test]
    fn podcast_scope_filters_candidates() {
        let candidates = vec![
            episode("a", "p1", "Comedy One"),
            episode("b", "p2", "Comedy Two"),
        ];
        let query = SearchQuery::new("comedy").with_podcast("p2");
        let response = SearchEngine::default().search_at(&query, &candidates, now());
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].episode.id, "b");
        assert_eq!(response.results[0].podcast.id, "p2");
    }

    #[test]
    fn explain_setting_keeps_breakdown() {
        let engine = SearchEngine::new(SearchSettings {
            explain: true,
            ..SearchSettings::default()
        });
        let candidates = vec![episode("a", "p1", "Comedy")];
        let response = engine.search_at(&SearchQuery::new("comedy"), &candidates, now());
        let explain = response.results[0]
            .relevance
            .explain
            .as_ref()
            .expect("explain");
        assert_eq!(explain.final_score, response.results[0].relevance.score);
    }

    #[test]
    fn custom_markers_flow_into_highlights() {
        let engine = SearchEngine::new(SearchSettings {
            highlight_open: "**".to_string(),
            highlight_close: "**".to_string(),
            ..SearchSettings::default()
        });
        let candidates = vec![episode("a", "p1", "Comedy Hour")];
        let response = engine.search_at(&SearchQuery::new("hour"), &candidates, now());
        assert_eq!(
            response.results[0].relevance.highlights[&SearchField::Title],
            "Comedy **Hour**"
        );
    }

    #[test]
    fn out_of_bounds_query_returns_empty_envelope() {
        let candidates = vec![episode("a", "p1", "A")];
        let long = "a".repeat(101);
        for raw in ["", "a", " ", long.as_str()] {
            let response =
                SearchEngine::default().search_at(&SearchQuery::new(raw), &candidates, now());
            assert!(response.results.is_empty());
            assert_eq!(response.total, 0);
            assert!(!response.has_more);
        }
    }

    #[test]
    fn free_function_uses_defaults() {
        let candidates = vec![episode("a", "p1", "Comedy")];
        let response = search(&SearchQuery::new("comedy"), &candidates);
        assert_eq!(response.total, 1);
    }
}
