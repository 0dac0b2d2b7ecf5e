// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker insertion around matched query terms.
//!
//! Spans come from the same matcher the scorer uses, so every matched field
//! gets at least one marker. The surrounding text is not escaped; rendering
//! layers are responsible for that.

use std::ops::Range;

use super::matcher;
use super::MatchMode;

pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighter {
    open: String,
    close: String,
    mode: MatchMode,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_OPEN, DEFAULT_HIGHLIGHT_CLOSE, MatchMode::Substring)
    }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            mode,
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Sorted, non-overlapping byte ranges of `text` matched by any of the
    /// normalized `terms`.
    pub fn find_spans(&self, text: &str, terms: &[String]) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = terms
            .iter()
            .flat_map(|term| matcher::find_spans(text, term, self.mode))
            .collect();
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start < last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        merged
    }

    /// Wrap every case-insensitive occurrence of `terms` in `text`.
    pub fn highlight(&self, text: &str, terms: &[String]) -> String {
        self.mark(text, &self.find_spans(text, terms))
    }

    /// Wrap the given sorted, non-overlapping `spans` of `text`.
    pub fn mark(&self, text: &str, spans: &[Range<usize>]) -> String {
        let extra = spans.len() * (self.open.len() + self.close.len());
        let mut out = String::with_capacity(text.len() + extra);
        let mut last = 0;
        for span in spans {
            out.push_str(&text[last..span.start]);
            out.push_str(&self.open);
            out.push_str(&text[span.clone()]);
            out.push_str(&self.close);
            last = span.end;
        }
        out.push_str(&text[last..]);
        out
    }

    /// Remove every occurrence of this highlighter's markers.
    ///
    /// Lossy when the source text itself contained the marker strings; use
    /// [`Highlighter::strip_inserted`] to undo exactly what was added.
    pub fn strip(&self, text: &str) -> String {
        let without_open = if self.open.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.open, "")
        };
        if self.close.is_empty() {
            without_open
        } else {
            without_open.replace(&self.close, "")
        }
    }

    /// Remove only the markers [`Highlighter::mark`] inserted for `spans`.
    ///
    /// Returns `None` when `marked` was not produced from these spans.
    pub fn strip_inserted(&self, marked: &str, spans: &[Range<usize>]) -> Option<String> {
        let mut out = String::with_capacity(marked.len());
        let mut cursor = 0;
        let mut last = 0;
        for span in spans {
            let plain = span.start.checked_sub(last)?;
            out.push_str(marked.get(cursor..cursor + plain)?);
            cursor += plain;
            cursor = skip_marker(marked, cursor, &self.open)?;
            out.push_str(marked.get(cursor..cursor + span.len())?);
            cursor += span.len();
            cursor = skip_marker(marked, cursor, &self.close)?;
            last = span.end;
        }
        out.push_str(marked.get(cursor..)?);
        Some(out)
    }
}

fn skip_marker(marked: &str, at: usize, marker: &str) -> Option<usize> {
    let end = at + marker.len();
    (marked.get(at..end)? == marker).then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn wraps_case_insensitive_matches() {
        let out = Highlighter::default().highlight("Classic Comedy Gold", &terms(&["comedy"]));
        assert_eq!(out, "Classic <mark>Comedy</mark> Gold");
    }

    #[test]
    fn wraps_every_occurrence_of_every_term() {
        let out = Highlighter::default().highlight(
            "Jazz talk: jazz, blues and more JAZZ",
            &terms(&["jazz", "blues"]),
        );
        let expected = concat!(
            "<mark>Jazz</mark> talk: <mark>jazz</mark>, ",
            "<mark>blues</mark> and more <mark>JAZZ</mark>",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn overlapping_terms_merge_into_one_span() {
        let out = Highlighter::default().highlight("comedy", &terms(&["med", "comedy"]));
        assert_eq!(out, "<mark>comedy</mark>");

        let out = Highlighter::default().highlight("jazzercise", &terms(&["jazz", "zzer"]));
        assert_eq!(out, "<mark>jazzer</mark>cise");
    }

    #[test]
    fn custom_markers_and_symbol_terms() {
        let highlighter = Highlighter::new("[", "]", MatchMode::Substring);
        let out = highlighter.highlight("C++ (and c++) tips", &terms(&["c++"]));
        assert_eq!(out, "[C++] (and [c++]) tips");
    }

    #[test]
    fn word_mode_skips_partial_words() {
        let highlighter = Highlighter::new("<b>", "</b>", MatchMode::Word);
        let out = highlighter.highlight("art and party art.", &terms(&["art"]));
        assert_eq!(out, "<b>art</b> and party <b>art</b>.");
    }

    #[test]
    fn word_mode_marks_words_wrapped_in_underscores() {
        let highlighter = Highlighter::new("<mark>", "</mark>", MatchMode::Word);
        let out = highlighter.highlight("the _art_ show", &terms(&["art"]));
        assert_eq!(out, "the _<mark>art</mark>_ show");
    }

    #[test]
    fn marks_characters_with_expanding_lowercase() {
        let term = matcher::fold_case("İstanbul");
        let out = Highlighter::default().highlight("İstanbul Nights", &[term]);
        assert_eq!(out, "<mark>İstanbul</mark> Nights");
    }

    #[test]
    fn leaves_text_alone_without_terms() {
        let text = "<b>raw</b> & unescaped";
        assert_eq!(Highlighter::default().highlight(text, &[]), text);
    }

    #[test]
    fn strip_restores_original_text() {
        let highlighter = Highlighter::default();
        let text = "Ünïcode Straße and STRASSE café";
        let marked = highlighter.highlight(text, &terms(&["café", "straße"]));
        assert!(marked.contains("<mark>"));
        assert_eq!(highlighter.strip(&marked), text);
    }

    #[test]
    fn literal_markers_in_source_survive_strip_inserted_only() {
        let highlighter = Highlighter::default();
        let text = "Use <mark> tags for comedy";
        let spans = highlighter.find_spans(text, &terms(&["comedy"]));
        let marked = highlighter.mark(text, &spans);
        assert_eq!(marked, "Use <mark> tags for <mark>comedy</mark>");
        assert_eq!(highlighter.strip(&marked), "Use  tags for comedy");
        assert_eq!(highlighter.strip_inserted(&marked, &spans).as_deref(), Some(text));

        let spans = highlighter.find_spans(text, &terms(&["mark"]));
        let marked = highlighter.mark(text, &spans);
        assert_eq!(marked, "Use <<mark>mark</mark>> tags for comedy");
        assert_eq!(highlighter.strip_inserted(&marked, &spans).as_deref(), Some(text));
    }

    #[test]
    fn strip_inserted_rejects_foreign_text() {
        let highlighter = Highlighter::default();
        let spans = highlighter.find_spans("comedy gold", &terms(&["gold"]));
        assert_eq!(highlighter.strip_inserted("comedy gold", &spans), None);
    }
}
