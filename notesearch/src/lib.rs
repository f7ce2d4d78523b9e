//! # Notesearch
//!
//! In-memory full-text search for a small-to-medium corpus of notes.
//!
//! Notesearch provides:
//! - **BM25 ranking** over a one-shot, immutable index
//! - **Mixed-script tokenization**: Latin words, CJK 1/2/3-grams and digit runs
//! - **Field boosts** favouring title hits over content hits
//! - **Fuzzy fallback** via Levenshtein similarity for weak matches
//! - **Match spans** with merged, non-overlapping highlight ranges
//!
//! ## Quick Start
//!
//! ```rust
//! use notesearch::{Document, SearchEngine, SearchOptions};
//!
//! let engine = SearchEngine::new(vec![
//!     Document::new(1, "Quick Start", "Install and run."),
//!     Document::new(2, "Network Basics", "Hosts, routes and packets."),
//! ])
//! .unwrap();
//!
//! let results = engine.search("network", &SearchOptions::default());
//! assert_eq!(results[0].item.id, 2);
//! assert!(!results[0].matches.is_empty());
//! ```

pub mod document;
pub mod error;
pub mod fuzzy;
pub mod highlight;
pub mod index;
pub mod scoring;
pub mod search;
pub mod tokenizer;

// Re-exports for convenience
pub use document::{Document, Searchable};
pub use error::{Error, Result};
pub use highlight::{find_matches, highlight_text, Field, FieldMatch};
pub use index::{Index, IndexStats};
pub use search::{SearchEngine, SearchOptions, SearchResult, SharedEngine, DEFAULT_LIMIT};
pub use tokenizer::tokenize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
