// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for rewind
//!
//! Loads configuration from .rewindrc.toml in current directory or ~/.config/rewind/config.toml

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::search::tokenizer::QueryBounds;
use crate::search::{
    FieldWeights, MatchMode, RecencyPolicy, SearchField, SearchSettings, DEFAULT_LIMIT, MAX_LIMIT,
    MAX_SEARCH_LENGTH, MIN_SEARCH_LENGTH,
};

pub const LOCAL_CONFIG_FILE: &str = ".rewindrc.toml";
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Configuration loaded from .rewindrc.toml or ~/.config/rewind/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog JSON file searched by the CLI
    pub catalog: Option<PathBuf>,
    /// Search tunables
    pub search: SearchConfig,
}

/// `[search]` table. Unset keys fall back to built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_query_length: Option<usize>,
    pub max_query_length: Option<usize>,
    pub default_limit: Option<usize>,
    pub max_limit: Option<usize>,
    pub recency_weight: Option<f32>,
    pub recency_window_days: Option<f32>,
    pub match_mode: Option<String>,
    pub highlight_open: Option<String>,
    pub highlight_close: Option<String>,
    /// Keyed by field name (`title`, `guests`, `description`, `tags`, `podcast_title`)
    pub field_weights: BTreeMap<String, f32>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .rewindrc.toml in current directory
    /// 2. ~/.config/rewind/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(Path::new(LOCAL_CONFIG_FILE)) {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("rewind").join("config.toml");
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match Self::from_toml(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Catalog path: CLI value, then config, then ./catalog.json
    pub fn catalog_path(&self, cli_value: Option<&Path>) -> PathBuf {
        cli_value
            .map(Path::to_path_buf)
            .or_else(|| self.catalog.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
    }

    /// Build engine settings, skipping invalid values with a warning.
    pub fn search_settings(&self) -> SearchSettings {
        let search = &self.search;
        let defaults = SearchSettings::default();

        let query_length = |name: &str, value: usize| {
            clamp_setting(name, value, MIN_SEARCH_LENGTH, MAX_SEARCH_LENGTH)
        };
        let bounds = QueryBounds {
            min_len: search
                .min_query_length
                .map(|v| query_length("min_query_length", v))
                .unwrap_or(defaults.bounds.min_len),
            max_len: search
                .max_query_length
                .map(|v| query_length("max_query_length", v))
                .unwrap_or(defaults.bounds.max_len),
        };
        let bounds = if bounds.min_len > bounds.max_len {
            tracing::warn!(
                min = bounds.min_len,
                max = bounds.max_len,
                "min_query_length exceeds max_query_length; using defaults"
            );
            defaults.bounds
        } else {
            bounds
        };

        let max_limit = search
            .max_limit
            .filter(|v| *v > 0)
            .map(|v| clamp_setting("max_limit", v, 1, MAX_LIMIT))
            .unwrap_or(MAX_LIMIT);
        let default_limit = search
            .default_limit
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(max_limit);

        let recency = RecencyPolicy {
            weight: search
                .recency_weight
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.recency.weight),
            window_days: search
                .recency_window_days
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.recency.window_days),
        };

        let match_mode = match search.match_mode.as_deref() {
            None => defaults.match_mode,
            Some(raw) => MatchMode::parse(raw).unwrap_or_else(|| {
                tracing::warn!(value = raw, "unknown match_mode; using substring");
                MatchMode::Substring
            }),
        };

        SearchSettings {
            bounds,
            default_limit,
            max_limit,
            weights: self.field_weights(),
            recency,
            match_mode,
            highlight_open: search
                .highlight_open
                .clone()
                .unwrap_or(defaults.highlight_open),
            highlight_close: search
                .highlight_close
                .clone()
                .unwrap_or(defaults.highlight_close),
            explain: false,
        }
    }

    fn field_weights(&self) -> FieldWeights {
        let mut overrides = BTreeMap::new();
        for (name, weight) in &self.search.field_weights {
            match SearchField::parse(name) {
                Some(field) => {
                    overrides.insert(field, *weight);
                }
                None => tracing::warn!(field = %name, "unknown field in [search.field_weights]"),
            }
        }
        let (weights, rejected) = FieldWeights::with_overrides(&overrides);
        for field in rejected {
            tracing::warn!(%field, "field weight must be a positive number; keeping default");
        }
        weights
    }
}

/// Pull a configured size back inside `[min, max]`, warning when it moved.
fn clamp_setting(name: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!(setting = name, value, clamped, "setting out of range; clamping");
    }
    clamped
}
