//! Searchable document contract

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Anything the engine can index: an id plus a title and a content field.
///
/// Callers implement this for their own note type; any extra fields ride
/// along untouched since results borrow the original value.
pub trait Searchable {
    /// Caller-assigned id, unique within one corpus snapshot
    fn id(&self) -> u64;
    /// Title text (empty when missing)
    fn title(&self) -> &str;
    /// Body text (empty when missing)
    fn content(&self) -> &str;
}

/// Minimal document carrying only the indexed fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Content
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(id: u64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Document {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Parse a JSON array of documents
    pub fn parse_json(json: &str) -> Result<Vec<Document>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Searchable for Document {
    fn id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn id(&self) -> u64 {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn content(&self) -> &str {
        (**self).content()
    }
}
