// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering and pagination of scored results.

use std::cmp::Ordering;
use std::time::Instant;

use super::{SearchResponse, SearchResult};

/// Page window after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

/// Sort `matches` by descending score and cut out `page`.
///
/// `matches` must be in candidate order; the sort is stable so equal scores
/// keep that order. Non-positive scores are dropped before counting.
pub fn assemble(mut matches: Vec<SearchResult>, page: Page, started: Instant) -> SearchResponse {
    matches.retain(|result| result.relevance.score > 0.0);
    sort_by_score_stable(&mut matches);

    let total = matches.len();
    let has_more = page.offset.saturating_add(page.limit) < total;
    let results: Vec<SearchResult> = matches
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();

    SearchResponse {
        results,
        total,
        has_more,
        search_time: elapsed_ms(started),
    }
}

fn sort_by_score_stable(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.relevance
            .score
            .partial_cmp(&a.relevance.score)
            .unwrap_or(Ordering::Equal)
    });
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
