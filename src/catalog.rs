// SPDX-License-Identifier: MIT OR Apache-2.0

//! Podcast/episode catalog loaded from JSON.
//!
//! Produces the denormalized [`SearchableEpisode`] candidates the search
//! engine scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::CatalogError;
use crate::search::SearchableEpisode;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Podcast {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Episode {
    pub id: String,
    pub podcast_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub guests: Vec<String>,
    pub tags: Vec<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    /// Seconds.
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub podcasts: Vec<Podcast>,
    pub episodes: Vec<Episode>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            podcasts = catalog.podcasts.len(),
            episodes = catalog.episodes.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Candidates for search, optionally scoped to one podcast.
    ///
    /// Episodes keep catalog order, which is the tie-break order of equal
    /// scores.
    pub fn searchable_episodes(&self, podcast_id: Option<&str>) -> Vec<SearchableEpisode> {
        let podcasts: HashMap<&str, &Podcast> = self
            .podcasts
            .iter()
            .map(|podcast| (podcast.id.as_str(), podcast))
            .collect();

        self.episodes
            .iter()
            .filter(|episode| match podcast_id {
                Some(scope) => episode.podcast_id.as_deref() == Some(scope),
                None => true,
            })
            .map(|episode| {
                let podcast = episode
                    .podcast_id
                    .as_deref()
                    .and_then(|id| podcasts.get(id).copied());
                if podcast.is_none() {
                    tracing::warn!(
                        episode = %episode.id,
                        podcast = episode.podcast_id.as_deref().unwrap_or("<none>"),
                        "episode references unknown podcast"
                    );
                }
                to_searchable(episode, podcast)
            })
            .collect()
    }
}

fn to_searchable(episode: &Episode, podcast: Option<&Podcast>) -> SearchableEpisode {
    let mut searchable = SearchableEpisode {
        id: episode.id.clone(),
        podcast_id: episode.podcast_id.clone(),
        title: episode.title.clone(),
        description: episode.description.clone(),
        guests: episode.guests.clone(),
        tags: episode.tags.clone(),
        release_date: episode.release_date,
        image_url: episode.image_url.clone(),
        audio_url: episode.audio_url.clone(),
        duration: episode.duration,
        podcast_title: podcast.and_then(|p| p.title.clone()),
        podcast_image_url: podcast.and_then(|p| p.image_url.clone()),
        searchable_text: String::new(),
    };
    searchable.refresh_searchable_text();
    searchable
}
