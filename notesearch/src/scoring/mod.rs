//! Relevance scoring
//!
//! A document's score is the BM25 sum over query tokens plus a field boost
//! computed from the raw query. When that total stays below
//! [`FUZZY_FALLBACK_SCORE`] and fuzzy matching is on, approximate word
//! matches add a small bonus.
//!
//! # Constants
//!
//! | Boost                       | Value               |
//! |-----------------------------|---------------------|
//! | Title equals query          | `TITLE_WEIGHT * 20` |
//! | Title starts with query     | `TITLE_WEIGHT * 10` |
//! | Title contains query        | `TITLE_WEIGHT * 6`  |
//! | Content occurrences         | `1.5` each, max `12`|
//! | Query in first 300 chars    | `5`                 |
//! | Title position `p`          | `max(0, 5 - 0.5p)`  |
//! | Fuzzy title / fuzzy word    | `2` / `0.3`         |
//!
//! The three title boosts are exclusive; the first that applies wins.

use crate::document::Searchable;
use crate::fuzzy::{fuzzy_match, MIN_FUZZY_LEN};
use crate::index::Index;

/// Term frequency saturation
pub const BM25_K1: f64 = 1.5;

/// Document length normalization
pub const BM25_B: f64 = 0.5;

/// Weight of the title field in the field boost
pub const TITLE_WEIGHT: f64 = 5.0;

/// Scores below this trigger the fuzzy fallback
pub const FUZZY_FALLBACK_SCORE: f64 = 2.0;

const EXACT_TITLE_MULTIPLIER: f64 = 20.0;
const TITLE_PREFIX_MULTIPLIER: f64 = 10.0;
const TITLE_CONTAINS_MULTIPLIER: f64 = 6.0;

const CONTENT_OCCURRENCE_BOOST: f64 = 1.5;
const CONTENT_BOOST_CAP: f64 = 12.0;

const LEAD_WINDOW_CHARS: usize = 300;
const LEAD_BOOST: f64 = 5.0;

const TITLE_POSITION_BOOST: f64 = 5.0;
const TITLE_POSITION_DECAY: f64 = 0.5;

const FUZZY_TITLE_BONUS: f64 = 2.0;
const FUZZY_WORD_BONUS: f64 = 0.3;

/// BM25 contribution of one term
///
/// Non-decreasing in `tf` for a fixed length. An `avg_doc_len` of zero
/// disables length normalization instead of dividing by zero.
pub fn bm25_term(tf: f64, idf: f64, doc_len: f64, avg_doc_len: f64) -> f64 {
    if tf <= 0.0 {
        return 0.0;
    }
    let length_ratio = if avg_doc_len > 0.0 {
        doc_len / avg_doc_len
    } else {
        0.0
    };
    let numerator = tf * (BM25_K1 + 1.0);
    let denominator = tf + BM25_K1 * (1.0 - BM25_B + BM25_B * length_ratio);
    idf * (numerator / denominator)
}

/// BM25 score of document `doc` (corpus position) for `query_tokens`
pub fn bm25(index: &Index, query_tokens: &[String], doc: usize) -> f64 {
    let doc_len = index.document_length(doc) as f64;
    let avg_doc_len = index.average_document_length();

    query_tokens
        .iter()
        .map(|token| {
            let tf = index.term_frequency(doc, token) as f64;
            bm25_term(tf, index.idf(token), doc_len, avg_doc_len)
        })
        .sum()
}

/// Heuristic boost for where the raw query appears, compared case-insensitively
pub fn field_boost(query: &str, title: &str, content: &str) -> f64 {
    let query = query.to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    let title = title.to_lowercase();
    let content = content.to_lowercase();
    let mut boost = 0.0;

    if title == query {
        boost += TITLE_WEIGHT * EXACT_TITLE_MULTIPLIER;
    } else if title.starts_with(&query) {
        boost += TITLE_WEIGHT * TITLE_PREFIX_MULTIPLIER;
    } else if title.contains(&query) {
        boost += TITLE_WEIGHT * TITLE_CONTAINS_MULTIPLIER;
    }

    let occurrences = content.matches(&query).count();
    if occurrences > 0 {
        boost += (occurrences as f64 * CONTENT_OCCURRENCE_BOOST).min(CONTENT_BOOST_CAP);
    }

    if char_prefix(&content, LEAD_WINDOW_CHARS).contains(&query) {
        boost += LEAD_BOOST;
    }

    if let Some(byte_pos) = title.find(&query) {
        let position = title[..byte_pos].chars().count() as f64;
        boost += (TITLE_POSITION_BOOST - position * TITLE_POSITION_DECAY).max(0.0);
    }

    boost
}

/// Approximate-match bonus for query tokens longer than two chars
///
/// Each eligible token earns a bonus if it fuzzily matches the whole
/// lowercased title, plus a smaller one per whitespace-separated word of
/// title and content it fuzzily matches.
pub fn fuzzy_bonus(query_tokens: &[String], title: &str, content: &str) -> f64 {
    let title_lower = title.to_lowercase();
    let all_text = format!("{} {}", title, content).to_lowercase();
    let words: Vec<&str> = all_text.split_whitespace().collect();
    let mut bonus = 0.0;

    for token in query_tokens
        .iter()
        .filter(|token| token.chars().count() >= MIN_FUZZY_LEN)
    {
        if fuzzy_match(token, &title_lower) {
            bonus += FUZZY_TITLE_BONUS;
        }
        for word in &words {
            if fuzzy_match(token, word) {
                bonus += FUZZY_WORD_BONUS;
            }
        }
    }

    bonus
}

/// Full score of document `doc` at corpus position `position`
pub fn score_document<D: Searchable>(
    index: &Index,
    position: usize,
    doc: &D,
    query: &str,
    query_tokens: &[String],
    fuzzy: bool,
) -> f64 {
    let mut score =
        bm25(index, query_tokens, position) + field_boost(query, doc.title(), doc.content());

    if fuzzy && score < FUZZY_FALLBACK_SCORE {
        let bonus = fuzzy_bonus(query_tokens, doc.title(), doc.content());
        if bonus > 0.0 {
            tracing::trace!(id = doc.id(), score, bonus, "Applied fuzzy fallback");
        }
        score += bonus;
    }

    score
}

/// The first `n` chars of `text`
fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}
