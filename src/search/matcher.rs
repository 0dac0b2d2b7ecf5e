// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term matching shared by the tokenizer, scorer and highlighter.
//!
//! All three fold case with [`fold_case`] and split words with
//! [`word_spans`], so a field that scores a term always has a span to mark.

use std::ops::Range;

use super::MatchMode;

/// Per-character lowercase mapping.
///
/// Unlike `str::to_lowercase` there is no context-sensitive final sigma, so
/// folding a substring gives the same bytes as folding it in place.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Byte ranges of the words in `text`.
///
/// Words are whitespace-separated runs with leading non-alphanumerics and
/// trailing punctuation removed. Trailing combining marks stay attached.
pub fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(begin) = start.take() {
                spans.extend(trim_word(text, begin..idx));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(begin) = start {
        spans.extend(trim_word(text, begin..text.len()));
    }
    spans
}

/// Case-folded words of `text`.
pub fn normalize_words(text: &str) -> Vec<String> {
    word_spans(text)
        .into_iter()
        .map(|span| fold_case(&text[span]))
        .collect()
}

/// Byte ranges of `text` matched by the already-folded `term`.
pub fn find_spans(text: &str, term: &str, mode: MatchMode) -> Vec<Range<usize>> {
    if term.is_empty() {
        return Vec::new();
    }
    match mode {
        MatchMode::Substring => {
            let folded = FoldedText::new(text);
            folded
                .lower
                .match_indices(term)
                .map(|(start, found)| folded.original_range(start..start + found.len()))
                .collect()
        }
        MatchMode::Word => word_spans(text)
            .into_iter()
            .filter(|span| fold_case(&text[span.clone()]) == term)
            .collect(),
    }
}

fn trim_word(text: &str, span: Range<usize>) -> Option<Range<usize>> {
    let chunk = &text[span.clone()];
    let rest = chunk.trim_start_matches(|c: char| !c.is_alphanumeric());
    let lead = chunk.len() - rest.len();
    let kept = rest.trim_end_matches(|c: char| !c.is_alphanumeric() && !is_combining_mark(c));
    if kept.is_empty() {
        None
    } else {
        let start = span.start + lead;
        Some(start..start + kept.len())
    }
}

/// Combining diacritical mark blocks (NFD accents).
fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Folded text with a byte map back to the original characters.
struct FoldedText {
    lower: String,
    origin: Vec<Range<usize>>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut lower = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        for (idx, ch) in text.char_indices() {
            let source = idx..idx + ch.len_utf8();
            for folded in ch.to_lowercase() {
                let before = lower.len();
                lower.push(folded);
                origin.extend(std::iter::repeat(source.clone()).take(lower.len() - before));
            }
        }
        Self { lower, origin }
    }

    /// Widen a folded range to whole original characters.
    fn original_range(&self, folded: Range<usize>) -> Range<usize> {
        self.origin[folded.start].start..self.origin[folded.end - 1].end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_spans_trim_edges_and_keep_inner_punctuation() {
        let text = "  (hello) _art_ don't -- ";
        let words: Vec<&str> = word_spans(text).into_iter().map(|s| &text[s]).collect();
        assert_eq!(words, vec!["hello", "art", "don't"]);
    }

    #[test]
    fn trailing_combining_mark_stays_on_word() {
        assert_eq!(normalize_words("Cafe\u{301}!"), vec!["cafe\u{301}"]);
        assert_eq!(normalize_words("Cafe!"), vec!["cafe"]);
    }

    #[test]
    fn substring_spans_map_expanded_lowercase_back_to_source() {
        let text = "İstanbul Nights";
        let term = fold_case("İstanbul");
        let spans = find_spans(text, &term, MatchMode::Substring);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].clone()], "İstanbul");
    }

    #[test]
    fn word_spans_match_folded_words_only() {
        let text = "the _art_ show, party ART";
        let spans = find_spans(text, "art", MatchMode::Word);
        let found: Vec<&str> = spans.into_iter().map(|s| &text[s]).collect();
        assert_eq!(found, vec!["art", "ART"]);
    }

    #[test]
    fn fold_case_is_positionally_stable() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("ΟΔΟΣ").len(), "ΟΔΟΣ".to_lowercase().len());
    }
}
