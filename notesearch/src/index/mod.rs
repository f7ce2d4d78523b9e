//! Immutable BM25 index
//!
//! Built once from a full corpus snapshot. Title and content are tokenized
//! separately but counted into a single per-document term map; field
//! weighting happens at scoring time, not here.

use crate::document::Searchable;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Summary of a built index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Number of indexed documents
    pub documents: usize,
    /// Number of distinct tokens
    pub vocabulary: usize,
    /// Sum of all document lengths
    pub total_tokens: usize,
    /// Mean document length (0 for an empty corpus)
    pub average_document_length: f64,
}

/// Term statistics for a corpus, addressed by corpus position
#[derive(Debug, Clone, Default)]
pub struct Index {
    term_frequency: Vec<HashMap<String, u32>>,
    document_length: Vec<usize>,
    document_frequency: HashMap<String, usize>,
    inverse_document_frequency: HashMap<String, f64>,
    average_document_length: f64,
    total_tokens: usize,
}

impl Index {
    /// Build the index for `docs`
    pub fn build<D: Searchable>(docs: &[D]) -> Self {
        let start = Instant::now();
        let mut index = Index {
            term_frequency: Vec::with_capacity(docs.len()),
            document_length: Vec::with_capacity(docs.len()),
            ..Default::default()
        };

        for doc in docs {
            let mut counts: HashMap<String, u32> = HashMap::new();
            let mut length = 0;

            for text in [doc.title(), doc.content()] {
                for token in tokenize(text) {
                    length += 1;
                    *counts.entry(token).or_insert(0) += 1;
                }
            }

            for token in counts.keys() {
                *index.document_frequency.entry(token.clone()).or_insert(0) += 1;
            }

            index.total_tokens += length;
            index.document_length.push(length);
            index.term_frequency.push(counts);
        }

        let n = docs.len() as f64;
        index.average_document_length = if docs.is_empty() {
            0.0
        } else {
            index.total_tokens as f64 / n
        };

        index.inverse_document_frequency = index
            .document_frequency
            .iter()
            .map(|(token, &df)| {
                let df = df as f64;
                (token.clone(), ((n - df + 0.5) / (df + 0.5) + 1.0).ln())
            })
            .collect();

        tracing::debug!(
            documents = docs.len(),
            vocabulary = index.document_frequency.len(),
            total_tokens = index.total_tokens,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built search index"
        );

        index
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.document_length.len()
    }

    /// Whether the corpus was empty
    pub fn is_empty(&self) -> bool {
        self.document_length.is_empty()
    }

    /// Occurrences of `token` in document `doc` (0 when absent or out of range)
    pub fn term_frequency(&self, doc: usize, token: &str) -> u32 {
        self.term_frequency
            .get(doc)
            .and_then(|counts| counts.get(token))
            .copied()
            .unwrap_or(0)
    }

    /// Token count of document `doc`
    pub fn document_length(&self, doc: usize) -> usize {
        self.document_length.get(doc).copied().unwrap_or(0)
    }

    /// Number of documents containing `token`
    pub fn document_frequency(&self, token: &str) -> usize {
        self.document_frequency.get(token).copied().unwrap_or(0)
    }

    /// Precomputed IDF weight of `token` (0 for unseen tokens)
    pub fn idf(&self, token: &str) -> f64 {
        self.inverse_document_frequency
            .get(token)
            .copied()
            .unwrap_or(0.0)
    }

    /// Mean document length
    pub fn average_document_length(&self) -> f64 {
        self.average_document_length
    }

    /// Summary statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.len(),
            vocabulary: self.document_frequency.len(),
            total_tokens: self.total_tokens,
            average_document_length: self.average_document_length,
        }
    }
}
