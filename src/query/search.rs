// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rewind search`: load the catalog, run the engine, print the page.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::cli::{CliMatchMode, OutputFormat};
use rewind_search::catalog::Catalog;
use rewind_search::config::Config;
use rewind_search::errors::suggestions::no_results_suggestion;
use rewind_search::output::{
    colorize_dim, colorize_title, print_json, render_highlights, use_colors,
};
use rewind_search::search::{
    Highlighter, SearchEngine, SearchField, SearchQuery, SearchResponse, SearchResult,
};

pub struct SearchArgs<'a> {
    pub query: &'a str,
    pub catalog: Option<&'a Path>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub podcast: Option<&'a str>,
    pub match_mode: Option<CliMatchMode>,
    pub now: Option<DateTime<Utc>>,
    pub explain: bool,
}

pub fn run(args: SearchArgs<'_>, format: OutputFormat, compact: bool) -> Result<()> {
    let config = Config::load();
    let catalog_path = config.catalog_path(args.catalog);
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let mut settings = config.search_settings();
    if let Some(mode) = args.match_mode {
        settings.match_mode = mode.into();
    }
    settings.explain = args.explain;
    let bounds = settings.bounds;
    let engine = SearchEngine::new(settings);

    let query = SearchQuery {
        query: args.query.to_string(),
        limit: args.limit,
        offset: args.offset,
        podcast_id: args.podcast.map(str::to_string),
    };
    let candidates = catalog.searchable_episodes(query.podcast_id.as_deref());
    let now = args.now.unwrap_or_else(Utc::now);
    let response = engine.search_at(&query, &candidates, now);

    match format {
        OutputFormat::Json => print_json(&response, compact)?,
        OutputFormat::Text => {
            if response.total == 0 {
                eprintln!(
                    "{}",
                    no_results_suggestion(args.query, bounds.min_len, bounds.max_len)
                );
            } else {
                print_text(&response, &query, engine.highlighter(), use_colors());
            }
        }
    }
    Ok(())
}

fn print_text(
    response: &SearchResponse,
    query: &SearchQuery,
    highlighter: &Highlighter,
    use_color: bool,
) {
    let offset = query.effective_offset();
    for (idx, result) in response.results.iter().enumerate() {
        print_result(offset + idx + 1, result, highlighter, use_color);
    }

    let first = offset + 1;
    let last = offset + response.results.len();
    let mut summary = if response.results.is_empty() {
        format!("No results on this page ({} total)", response.total)
    } else {
        format!("Showing {first}-{last} of {} result(s)", response.total)
    };
    summary.push_str(&format!(" in {}ms", response.search_time));
    if response.has_more {
        summary.push_str(&format!("; next page: --offset {last}"));
    }
    println!("{}", colorize_dim(&summary, use_color));
}

fn print_result(rank: usize, result: &SearchResult, highlighter: &Highlighter, use_color: bool) {
    let render = |text: &str| {
        render_highlights(text, highlighter.open(), highlighter.close(), use_color)
    };
    let relevance = &result.relevance;

    let title = relevance
        .highlights
        .get(&SearchField::Title)
        .map(|text| render(text))
        .unwrap_or_else(|| result.episode.title.clone());
    println!(
        "{rank}. {} {}",
        colorize_title(&title, use_color),
        colorize_dim(&format!("(score {:.2})", relevance.score), use_color)
    );

    let mut meta = vec![result.episode.podcast_name.clone()];
    if let Some(date) = result.episode.release_date {
        meta.push(date.format("%Y-%m-%d").to_string());
    }
    meta.push(result.episode.id.clone());
    let meta: Vec<String> = meta.into_iter().filter(|part| !part.is_empty()).collect();
    println!("   {}", colorize_dim(&meta.join(" | "), use_color));

    for (field, text) in &relevance.highlights {
        if *field == SearchField::Title {
            continue;
        }
        println!("   {field}: {}", render(text));
    }

    if let Some(explain) = &relevance.explain {
        let mut parts: Vec<String> = explain
            .field_scores
            .iter()
            .map(|(field, score)| format!("{field}={score:.2}"))
            .collect();
        parts.push(format!("recency={:.2}", explain.recency_bonus));
        println!("   {}", colorize_dim(&format!("explain: {}", parts.join(" ")), use_color));
    }
}
