// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request, candidate and response types for episode search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Queries shorter than this (in characters, after trimming) return nothing.
pub const MIN_SEARCH_LENGTH: usize = 2;
/// Queries longer than this (in characters, after trimming) return nothing.
pub const MAX_SEARCH_LENGTH: usize = 100;
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;
/// Recommended interval for callers to rebuild their candidate set.
pub const CACHE_TTL_SECONDS: u64 = 300;

/// Incoming search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast_id: Option<String>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_podcast(mut self, podcast_id: impl Into<String>) -> Self {
        self.podcast_id = Some(podcast_id.into());
        self
    }

    /// Page size clamped to `[1, max_limit]`, `default_limit` when unset.
    pub fn effective_limit(&self, default_limit: usize, max_limit: usize) -> usize {
        let max_limit = max_limit.max(1);
        match self.limit {
            None => default_limit.clamp(1, max_limit),
            Some(value) => usize::try_from(value.max(1))
                .unwrap_or(max_limit)
                .min(max_limit),
        }
    }

    /// Offset with negative values clamped to zero.
    pub fn effective_offset(&self) -> usize {
        self.offset
            .map(|value| usize::try_from(value.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(0)
    }
}

/// Searchable attribute of an episode.
///
/// Declaration order is the order fields appear in `matchedFields` and
/// `highlights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchField {
    Title,
    Guests,
    Description,
    Tags,
    PodcastTitle,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Guests,
        SearchField::Description,
        SearchField::Tags,
        SearchField::PodcastTitle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Guests => "guests",
            SearchField::Description => "description",
            SearchField::Tags => "tags",
            SearchField::PodcastTitle => "podcastTitle",
        }
    }

    /// Accepts both the camelCase wire name and snake_case config keys.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(SearchField::Title),
            "guests" => Some(SearchField::Guests),
            "description" => Some(SearchField::Description),
            "tags" => Some(SearchField::Tags),
            "podcasttitle" | "podcast_title" => Some(SearchField::PodcastTitle),
            _ => None,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Episode record prepared for scoring.
///
/// Every text field is optional; a missing field never matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchableEpisode {
    pub id: String,
    pub podcast_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub guests: Vec<String>,
    pub tags: Vec<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub duration: Option<u32>,
    pub podcast_title: Option<String>,
    pub podcast_image_url: Option<String>,
    /// Case-folded concatenation of every searchable field, for callers
    /// building their own indexes. Scoring always reads the fields.
    pub searchable_text: String,
}

impl SearchableEpisode {
    /// Raw text of `field`, or `None` when the field is absent or blank.
    pub fn field_text(&self, field: SearchField) -> Option<String> {
        let text = match field {
            SearchField::Title => self.title.clone(),
            SearchField::Description => self.description.clone(),
            SearchField::PodcastTitle => self.podcast_title.clone(),
            SearchField::Guests => join_list(&self.guests),
            SearchField::Tags => join_list(&self.tags),
        }?;
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Rebuilds `searchable_text` from the current field values.
    pub fn refresh_searchable_text(&mut self) {
        let parts: Vec<String> = SearchField::ALL
            .iter()
            .filter_map(|field| self.field_text(*field))
            .collect();
        self.searchable_text = super::matcher::fold_case(&parts.join(" "));
    }
}

fn join_list(items: &[String]) -> Option<String> {
    let kept: Vec<&str> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}

/// Per-candidate scoring breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreExplain {
    pub field_scores: BTreeMap<SearchField, f32>,
    pub recency_bonus: f32,
    pub final_score: f32,
}

/// Score computed for one candidate. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchScore {
    pub episode_id: String,
    pub score: f32,
    pub matched_fields: BTreeSet<SearchField>,
    /// Query terms that matched, per field.
    pub matched_terms: BTreeMap<SearchField, Vec<String>>,
    pub highlights: BTreeMap<SearchField, String>,
    pub explain: Option<ScoreExplain>,
}

impl SearchScore {
    pub fn empty(episode_id: &str) -> Self {
        Self {
            episode_id: episode_id.to_string(),
            score: 0.0,
            matched_fields: BTreeSet::new(),
            matched_terms: BTreeMap::new(),
            highlights: BTreeMap::new(),
            explain: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

/// Episode view returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeView {
    pub id: String,
    pub title: String,
    pub podcast_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relevance {
    pub score: f32,
    pub matched_fields: BTreeSet<SearchField>,
    pub highlights: BTreeMap<SearchField, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplain>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub episode: EpisodeView,
    pub podcast: PodcastView,
    pub relevance: Relevance,
}

impl SearchResult {
    pub fn build(episode: &SearchableEpisode, score: SearchScore) -> Self {
        let podcast_name = episode.podcast_title.clone().unwrap_or_default();
        Self {
            episode: EpisodeView {
                id: episode.id.clone(),
                title: episode.title.clone().unwrap_or_default(),
                podcast_name: podcast_name.clone(),
                image_url: episode
                    .image_url
                    .clone()
                    .or_else(|| episode.podcast_image_url.clone()),
                audio_url: episode.audio_url.clone(),
                release_date: episode.release_date,
                duration: episode.duration,
            },
            podcast: PodcastView {
                id: episode.podcast_id.clone().unwrap_or_default(),
                title: podcast_name,
                image_url: episode.podcast_image_url.clone(),
            },
            relevance: Relevance {
                score: score.score,
                matched_fields: score.matched_fields,
                highlights: score.highlights,
                explain: score.explain,
            },
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub has_more: bool,
    /// Elapsed wall-clock milliseconds.
    pub search_time: u64,
}

impl SearchResponse {
    pub fn empty(search_time: u64) -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            has_more: false,
            search_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_limit_defaults_and_clamps() {
        assert_eq!(SearchQuery::new("x").effective_limit(DEFAULT_LIMIT, MAX_LIMIT), 20);
        assert_eq!(
            SearchQuery::new("x").with_limit(0).effective_limit(DEFAULT_LIMIT, MAX_LIMIT),
            1
        );
        assert_eq!(
            SearchQuery::new("x").with_limit(-5).effective_limit(DEFAULT_LIMIT, MAX_LIMIT),
            1
        );
        assert_eq!(
            SearchQuery::new("x").with_limit(500).effective_limit(DEFAULT_LIMIT, MAX_LIMIT),
            100
        );
    }

    #[test]
    fn effective_offset_never_negative() {
        assert_eq!(SearchQuery::new("x").effective_offset(), 0);
        assert_eq!(SearchQuery::new("x").with_offset(-3).effective_offset(), 0);
        assert_eq!(SearchQuery::new("x").with_offset(7).effective_offset(), 7);
    }

    #[test]
    fn query_deserializes_from_camel_case() {
        let query: SearchQuery =
            serde_json::from_str(r#"{"query":"comedy","limit":5,"podcastId":"p1"}"#)
                .expect("parse");
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.podcast_id.as_deref(), Some("p1"));
        assert_eq!(query.offset, None);
    }

    #[test]
    fn field_text_skips_missing_and_blank_fields() {
        let episode = SearchableEpisode {
            id: "e1".to_string(),
            title: Some("  ".to_string()),
            guests: vec!["Ada".to_string(), " ".to_string(), "Grace".to_string()],
            ..SearchableEpisode::default()
        };
        assert_eq!(episode.field_text(SearchField::Title), None);
        assert_eq!(episode.field_text(SearchField::Description), None);
        assert_eq!(episode.field_text(SearchField::Tags), None);
        assert_eq!(
            episode.field_text(SearchField::Guests).as_deref(),
            Some("Ada, Grace")
        );
    }

    #[test]
    fn search_field_parse_accepts_config_spellings() {
        assert_eq!(SearchField::parse("podcast_title"), Some(SearchField::PodcastTitle));
        assert_eq!(SearchField::parse("podcastTitle"), Some(SearchField::PodcastTitle));
        assert_eq!(SearchField::parse("Title"), Some(SearchField::Title));
        assert_eq!(SearchField::parse("audio"), None);
    }

    #[test]
    fn response_serializes_camel_case_envelope() {
        let value = serde_json::to_value(SearchResponse::empty(3)).expect("json");
        assert_eq!(value["hasMore"], serde_json::json!(false));
        assert_eq!(value["searchTime"], serde_json::json!(3));
        assert_eq!(value["results"], serde_json::json!([]));
    }
}
