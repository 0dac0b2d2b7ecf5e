// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted field matching plus recency bonus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::matcher::{fold_case, normalize_words};
use super::{FieldWeights, ScoreExplain, SearchField, SearchScore, SearchableEpisode};

pub const DEFAULT_RECENCY_WEIGHT: f32 = 0.5;
pub const DEFAULT_RECENCY_WINDOW_DAYS: f32 = 365.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How a query term is tested against field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Term must equal a whole normalized word of the field.
    Word,
}

impl MatchMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "substring" => Some(MatchMode::Substring),
            "word" => Some(MatchMode::Word),
            _ => None,
        }
    }
}

/// Linear decay from `weight` at release time to zero after `window_days`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyPolicy {
    pub weight: f32,
    pub window_days: f32,
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        Self {
            weight: DEFAULT_RECENCY_WEIGHT,
            window_days: DEFAULT_RECENCY_WINDOW_DAYS,
        }
    }
}

impl RecencyPolicy {
    pub fn bonus(&self, released: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f32 {
        let Some(released) = released else {
            return 0.0;
        };
        if !(self.weight.is_finite() && self.window_days.is_finite())
            || self.weight <= 0.0
            || self.window_days <= 0.0
        {
            return 0.0;
        }
        let age_days = ((now - released).num_seconds() as f64 / SECONDS_PER_DAY).max(0.0);
        let freshness = (1.0 - age_days / f64::from(self.window_days)).max(0.0);
        (f64::from(self.weight) * freshness) as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    weights: FieldWeights,
    recency: RecencyPolicy,
    mode: MatchMode,
}

impl Scorer {
    pub fn new(weights: FieldWeights, recency: RecencyPolicy, mode: MatchMode) -> Self {
        Self {
            weights,
            recency,
            mode,
        }
    }

    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Score one candidate against normalized `terms`.
    ///
    /// Highlights are left empty. The recency bonus only applies when at
    /// least one field matched, so non-matching candidates stay at zero.
    pub fn score(
        &self,
        terms: &[String],
        episode: &SearchableEpisode,
        now: DateTime<Utc>,
    ) -> SearchScore {
        let mut result = SearchScore::empty(&episode.id);
        if terms.is_empty() {
            return result;
        }

        let mut field_scores: BTreeMap<SearchField, f32> = BTreeMap::new();
        for entry in self.weights.iter() {
            let Some(text) = episode.field_text(entry.field) else {
                continue;
            };
            let matched = self.matching_terms(terms, &text);
            if matched.is_empty() {
                continue;
            }
            let contribution = entry.weight * matched.len() as f32;
            result.score += contribution;
            *field_scores.entry(entry.field).or_insert(0.0) += contribution;
            result.matched_fields.insert(entry.field);
            result.matched_terms.insert(entry.field, matched);
        }

        if result.matched_fields.is_empty() {
            return result;
        }

        let recency_bonus = self.recency.bonus(episode.release_date, now);
        result.score += recency_bonus;
        result.explain = Some(ScoreExplain {
            field_scores,
            recency_bonus,
            final_score: result.score,
        });
        result
    }

    fn matching_terms(&self, terms: &[String], text: &str) -> Vec<String> {
        match self.mode {
            MatchMode::Substring => {
                let lower = fold_case(text);
                terms
                    .iter()
                    .filter(|term| lower.contains(term.as_str()))
                    .cloned()
                    .collect()
            }
            MatchMode::Word => {
                let words = normalize_words(text);
                terms
                    .iter()
                    .filter(|term| words.iter().any(|word| word == *term))
                    .cloned()
                    .collect()
            }
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(
            FieldWeights::default(),
            RecencyPolicy::default(),
            MatchMode::default(),
        )
    }
}
