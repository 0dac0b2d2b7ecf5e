// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field weight table.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

use super::SearchField;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldWeight {
    pub field: SearchField,
    pub weight: f32,
}

impl FieldWeight {
    pub const fn new(field: SearchField, weight: f32) -> Self {
        Self { field, weight }
    }
}

/// Ordered, immutable table of searchable fields and their multipliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldWeights {
    entries: Vec<FieldWeight>,
}

static DEFAULT_FIELD_WEIGHTS: Lazy<FieldWeights> = Lazy::new(|| FieldWeights {
    entries: vec![
        FieldWeight::new(SearchField::Title, 3.0),
        FieldWeight::new(SearchField::Guests, 2.0),
        FieldWeight::new(SearchField::PodcastTitle, 2.0),
        FieldWeight::new(SearchField::Tags, 1.5),
        FieldWeight::new(SearchField::Description, 1.0),
    ],
});

impl Default for FieldWeights {
    fn default() -> Self {
        DEFAULT_FIELD_WEIGHTS.clone()
    }
}

impl FieldWeights {
    /// Default table with `overrides` applied.
    ///
    /// Non-positive or non-finite weights are rejected and returned so the
    /// caller can report them; the default weight is kept for that field.
    pub fn with_overrides(overrides: &BTreeMap<SearchField, f32>) -> (Self, Vec<SearchField>) {
        let mut table = Self::default();
        let mut rejected = Vec::new();
        for (field, weight) in overrides {
            if !weight.is_finite() || *weight <= 0.0 {
                rejected.push(*field);
                continue;
            }
            match table.entries.iter_mut().find(|entry| entry.field == *field) {
                Some(entry) => entry.weight = *weight,
                None => table.entries.push(FieldWeight::new(*field, *weight)),
            }
        }
        (table, rejected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldWeight> {
        self.entries.iter()
    }

    pub fn weight_of(&self, field: SearchField) -> Option<f32> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| entry.weight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
