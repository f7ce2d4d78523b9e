//! Approximate string matching
//!
//! Edit distance over Unicode scalar values, normalized into a similarity in
//! `[0, 1]`. Used only as a low-score fallback, so the substring check runs
//! first and the O(nm) DP only when it fails.

/// Maximum normalized edit distance still treated as a match
pub const FUZZY_THRESHOLD: f64 = 0.3;

/// Shortest query (in chars) eligible for edit-distance matching
pub const MIN_FUZZY_LEN: usize = 3;

/// Classic Levenshtein distance (insert, delete, substitute) over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            curr[j + 1] = if ac == bc {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `1 - distance / max(len a, len b)`; two empty strings are identical
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Does `text` approximately contain `query`?
///
/// True when `text` contains `query` literally, or when `query` is at least
/// [`MIN_FUZZY_LEN`] chars and the whole-string similarity reaches
/// `1 - FUZZY_THRESHOLD`.
pub fn fuzzy_match(query: &str, text: &str) -> bool {
    if text.contains(query) {
        return true;
    }
    if query.chars().count() < MIN_FUZZY_LEN {
        return false;
    }
    similarity(query, text) >= 1.0 - FUZZY_THRESHOLD
}
