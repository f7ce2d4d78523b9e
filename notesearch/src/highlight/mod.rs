//! Match span location and highlighting
//!
//! Spans are half-open `[start, end)` ranges counted in chars of the
//! lowercased field text. Every occurrence of the whole query and of each
//! query token is collected, then overlapping or touching ranges are merged.

use crate::document::Searchable;
use crate::tokenizer::tokenize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document field a match was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Title field
    Title,
    /// Content field
    Content,
}

impl Field {
    /// Lowercase field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged match ranges within one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatch {
    /// Field the ranges refer to
    pub field: Field,
    /// Ascending, non-overlapping `[start, end)` char ranges
    pub indices: Vec<[usize; 2]>,
}

/// Locate query and token occurrences in a document's title and content.
///
/// Fields without any occurrence are omitted.
pub fn find_matches<D: Searchable>(query: &str, doc: &D) -> Vec<FieldMatch> {
    locate(&query.to_lowercase(), &tokenize(query), doc)
}

/// Span location with a pre-lowercased query and pre-computed tokens
pub(crate) fn locate<D: Searchable>(
    query_lower: &str,
    query_tokens: &[String],
    doc: &D,
) -> Vec<FieldMatch> {
    [(Field::Title, doc.title()), (Field::Content, doc.content())]
        .into_iter()
        .filter_map(|(field, text)| {
            let text = text.to_lowercase();
            let mut ranges = Vec::new();

            find_occurrences(&text, query_lower, &mut ranges);
            for token in query_tokens {
                find_occurrences(&text, token, &mut ranges);
            }

            if ranges.is_empty() {
                None
            } else {
                Some(FieldMatch {
                    field,
                    indices: merge_ranges(ranges),
                })
            }
        })
        .collect()
}

/// Sort ranges by start and coalesce those starting at or before the
/// running end.
pub fn merge_ranges(mut ranges: Vec<[usize; 2]>) -> Vec<[usize; 2]> {
    ranges.sort_unstable();

    let mut merged: Vec<[usize; 2]> = Vec::with_capacity(ranges.len());
    for [start, end] in ranges {
        match merged.last_mut() {
            Some(last) if start <= last[1] => last[1] = last[1].max(end),
            _ => merged.push([start, end]),
        }
    }
    merged
}

/// Push every occurrence of `needle` in `text`, including overlapping ones
fn find_occurrences(text: &str, needle: &str, out: &mut Vec<[usize; 2]>) {
    if needle.is_empty() {
        return;
    }

    let needle_chars = needle.chars().count();
    let mut from = 0;
    let mut chars_before = 0;

    while let Some(offset) = text[from..].find(needle) {
        let byte_pos = from + offset;
        chars_before += text[from..byte_pos].chars().count();
        out.push([chars_before, chars_before + needle_chars]);

        // Step one char so overlapping occurrences are found
        let step = text[byte_pos..].chars().next().map_or(1, char::len_utf8);
        from = byte_pos + step;
        chars_before += 1;
    }
}

/// Wrap query occurrences in `text` with `<mark>` tags, case-insensitively.
///
/// The full query is marked, along with any query token of two or more
/// chars that is not itself part of the query string (CJK n-grams
/// spanning stripped characters). Longer alternatives win so marks never
/// nest.
///
/// # Examples
/// ```
/// use notesearch::highlight_text;
///
/// assert_eq!(highlight_text("Rust is fast", "rust"), "<mark>Rust</mark> is fast");
/// assert_eq!(highlight_text("unchanged", "  "), "unchanged");
/// ```
pub fn highlight_text(text: &str, query: &str) -> String {
    if query.trim().is_empty() || text.is_empty() {
        return text.to_string();
    }

    let query_lower = query.to_lowercase();
    let mut needles = vec![query.to_string()];
    needles.extend(
        tokenize(query)
            .into_iter()
            .filter(|token| token.chars().count() >= 2 && !query_lower.contains(token.as_str())),
    );
    needles.sort_by_key(|needle| std::cmp::Reverse(needle.chars().count()));

    let alternation = needles
        .iter()
        .map(|needle| regex::escape(needle))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&format!("(?i){}", alternation)) {
        Ok(pattern) => pattern.replace_all(text, "<mark>$0</mark>").into_owned(),
        Err(e) => {
            tracing::warn!("Could not build highlight pattern for {:?}: {}", query, e);
            text.to_string()
        }
    }
}
