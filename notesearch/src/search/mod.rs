//! Search engine facade
//!
//! [`SearchEngine`] owns a corpus snapshot and the index built from it.
//! Queries are read-only; a corpus change means building a new engine and
//! swapping it in through [`SharedEngine`].

mod shared;

pub use shared::SharedEngine;

use crate::document::Searchable;
use crate::error::{Error, Result};
use crate::highlight::{locate, FieldMatch};
use crate::index::{Index, IndexStats};
use crate::scoring::score_document;
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

/// Default maximum number of results
pub const DEFAULT_LIMIT: usize = 50;

/// Search options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Enable the fuzzy fallback for weakly matching documents
    pub fuzzy: bool,
    /// Maximum number of results (0 returns nothing)
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            fuzzy: true,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchOptions {
    /// Set whether fuzzy matching is enabled
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Set the result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Parse options from raw request parameters
    ///
    /// Missing values keep their defaults. Negative limits clamp to 0 and
    /// out-of-range limits saturate; anything non-numeric is rejected.
    pub fn from_params(fuzzy: Option<&str>, limit: Option<&str>) -> Result<Self> {
        let mut options = SearchOptions::default();

        if let Some(raw) = fuzzy {
            options.fuzzy = match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(Error::InvalidOptions(format!(
                        "fuzzy must be a boolean, got {:?}",
                        raw
                    )))
                }
            };
        }

        if let Some(raw) = limit {
            options.limit = parse_limit(raw)?;
        }

        Ok(options)
    }
}

fn parse_limit(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n <= 0 => Ok(0),
        Ok(n) => Ok(usize::try_from(n).unwrap_or(usize::MAX)),
        Err(_) => {
            let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                Ok(usize::MAX)
            } else if trimmed
                .strip_prefix('-')
                .is_some_and(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
            {
                Ok(0)
            } else {
                Err(Error::InvalidOptions(format!(
                    "limit must be an integer, got {:?}",
                    raw
                )))
            }
        }
    }
}

/// Search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a, D> {
    /// The matched document, as supplied by the caller
    pub item: &'a D,
    /// Relevance score (always > 0)
    pub score: f64,
    /// Highlight spans per field; empty for fuzzy-only hits
    pub matches: Vec<FieldMatch>,
}

/// In-memory search engine over an immutable corpus snapshot
#[derive(Debug)]
pub struct SearchEngine<D> {
    docs: Vec<D>,
    positions: HashMap<u64, usize>,
    index: Index,
}

impl<D: Searchable> SearchEngine<D> {
    /// Build the engine and its index from a full corpus snapshot
    ///
    /// Fails if two documents share an id.
    pub fn new(docs: Vec<D>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(docs.len());
        for (position, doc) in docs.iter().enumerate() {
            if positions.insert(doc.id(), position).is_some() {
                return Err(Error::DuplicateDocumentId(doc.id()));
            }
        }

        let index = Index::build(&docs);
        Ok(SearchEngine {
            docs,
            positions,
            index,
        })
    }

    /// Rank documents against `query`
    ///
    /// Empty or whitespace-only queries return nothing without touching the
    /// index. Results are sorted by descending score; equal scores keep
    /// corpus order.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult<'_, D>> {
        if query.trim().is_empty() || options.limit == 0 {
            return Vec::new();
        }

        let start = Instant::now();
        let query_tokens = tokenize(query);

        let mut scored: Vec<(usize, f64)> = self
            .docs
            .iter()
            .enumerate()
            .map(|(position, doc)| {
                let score = score_document(
                    &self.index,
                    position,
                    doc,
                    query,
                    &query_tokens,
                    options.fuzzy,
                );
                (position, score)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        let hits = scored.len();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(options.limit);

        let query_lower = query.to_lowercase();
        let results: Vec<SearchResult<'_, D>> = scored
            .into_iter()
            .map(|(position, score)| {
                let item = &self.docs[position];
                SearchResult {
                    item,
                    score,
                    matches: locate(&query_lower, &query_tokens, item),
                }
            })
            .collect();

        tracing::debug!(
            query,
            hits,
            returned = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Search complete"
        );

        results
    }

    /// Look up a document by id
    pub fn get(&self, id: u64) -> Option<&D> {
        self.positions.get(&id).map(|&position| &self.docs[position])
    }
}

impl<D> SearchEngine<D> {
    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// The corpus, in its original order
    pub fn documents(&self) -> &[D] {
        &self.docs
    }

    /// Read-only view of the index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Index statistics
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn engine() -> SearchEngine<Document> {
        SearchEngine::new(vec![
            Document::new(1, "Quick Start", "Install the tool and run it."),
            Document::new(2, "Network Basics", "A network connects hosts."),
            Document::new(3, "Network Advanced", "Routing between networks."),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_options_default() {
        let options = SearchOptions::default();
        assert!(options.fuzzy);
        assert_eq!(options.limit, 50);
    }

    #[test]
    fn test_search_options_builders() {
        let options = SearchOptions::default().with_fuzzy(false).with_limit(3);
        assert_eq!(options, SearchOptions { fuzzy: false, limit: 3 });
    }

    #[test]
    fn test_search_options_from_params() {
        let options = SearchOptions::from_params(Some("false"), Some("10")).unwrap();
        assert_eq!(options, SearchOptions { fuzzy: false, limit: 10 });

        let options = SearchOptions::from_params(None, None).unwrap();
        assert_eq!(options, SearchOptions::default());
    }

    #[test]
    fn test_search_options_limit_clamps() {
        assert_eq!(SearchOptions::from_params(None, Some("-5")).unwrap().limit, 0);
        assert_eq!(SearchOptions::from_params(None, Some("0")).unwrap().limit, 0);
        assert_eq!(
            SearchOptions::from_params(None, Some("99999999999999999999999")).unwrap().limit,
            usize::MAX
        );
        assert_eq!(
            SearchOptions::from_params(None, Some("-99999999999999999999999")).unwrap().limit,
            0
        );
    }

    #[test]
    fn test_search_options_rejects_garbage() {
        assert!(matches!(
            SearchOptions::from_params(None, Some("ten")),
            Err(Error::InvalidOptions(_))
        ));
        assert!(matches!(
            SearchOptions::from_params(Some("maybe"), None),
            Err(Error::InvalidOptions(_))
        ));
        assert!(SearchOptions::from_params(None, Some("")).is_err());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let result = SearchEngine::new(vec![
            Document::new(1, "A", ""),
            Document::new(1, "B", ""),
        ]);
        assert!(matches!(result, Err(Error::DuplicateDocumentId(1))));
    }

    #[test]
    fn test_search_empty_query() {
        let engine = engine();
        assert!(engine.search("", &SearchOptions::default()).is_empty());
        assert!(engine.search("   \t", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_search_zero_limit() {
        let engine = engine();
        let options = SearchOptions::default().with_limit(0);
        assert!(engine.search("network", &options).is_empty());
    }

    #[test]
    fn test_search_ranks_network_docs() {
        let engine = engine();
        let results = engine.search("Network", &SearchOptions::default());
        let ids: Vec<u64> = results.iter().map(|r| r.item.id).collect();
        assert_eq!(results.len(), 2);
        assert!(ids.contains(&2));
        assert!(ids.contains(&3));
        assert!(results.iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn test_search_results_borrow_corpus() {
        let engine = engine();
        let results = engine.search("quick", &SearchOptions::default());
        assert!(std::ptr::eq(results[0].item, &engine.documents()[0]));
    }

    #[test]
    fn test_get_and_stats() {
        let engine = engine();
        assert_eq!(engine.get(2).map(|d| d.title.as_str()), Some("Network Basics"));
        assert!(engine.get(42).is_none());
        assert_eq!(engine.len(), 3);
        assert!(!engine.is_empty());
        assert_eq!(engine.stats().documents, 3);
    }

    #[test]
    fn test_empty_corpus() {
        let engine = SearchEngine::<Document>::new(Vec::new()).unwrap();
        assert!(engine.is_empty());
        assert!(engine.search("anything", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_search_result_serializes() {
        let engine = engine();
        let results = engine.search("quick start", &SearchOptions::default());
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["item"]["id"], 1);
        assert_eq!(json["matches"][0]["field"], "title");
        assert_eq!(json["matches"][0]["indices"][0][0], 0);
        assert!(json["score"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine<Document>>();
    }
}
