//! Mixed-script tokenizer
//!
//! Text is lowercased and split three ways: Latin words (`[a-z][a-z0-9]*`),
//! CJK character n-grams of length 1 to 3, and digit runs. The union is
//! returned without duplicates, in first-seen order.
//!
//! CJK text has no whitespace word boundaries, so every window over the
//! CJK-only residue of the text is emitted. This over-generates tokens but
//! lets a two-character query hit documents without a segmentation dictionary.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Longest CJK n-gram emitted
pub const MAX_NGRAM: usize = 3;

static LATIN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][a-z0-9]*").expect("latin word pattern is valid"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Whether `c` falls in the CJK Unified Ideographs block indexed as n-grams
pub fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Tokenize text into deduplicated index tokens
///
/// # Examples
/// ```
/// use notesearch::tokenize;
///
/// assert_eq!(tokenize("Rust 2024"), vec!["rust", "2024"]);
/// assert_eq!(tokenize("搜索"), vec!["搜", "搜索", "索"]);
/// assert!(tokenize("  ... ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    let mut push = |token: &str| {
        if seen.insert(token.to_string()) {
            tokens.push(token.to_string());
        }
    };

    for word in LATIN_WORD.find_iter(&normalized) {
        push(word.as_str());
    }

    let cjk: Vec<char> = normalized.chars().filter(|c| is_cjk(*c)).collect();
    for start in 0..cjk.len() {
        for n in 1..=MAX_NGRAM {
            if start + n > cjk.len() {
                break;
            }
            let gram: String = cjk[start..start + n].iter().collect();
            push(&gram);
        }
    }

    for digits in DIGIT_RUN.find_iter(&normalized) {
        push(digits.as_str());
    }

    tokens
}
