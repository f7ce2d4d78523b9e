//! Atomically swappable engine handle

use super::SearchEngine;
use crate::document::Searchable;
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// A shared, replaceable [`SearchEngine`].
///
/// Readers take an `Arc` snapshot and query it without holding the lock.
/// A new corpus is indexed outside the lock and swapped in whole; the
/// index of a published engine is never edited.
#[derive(Debug)]
pub struct SharedEngine<D> {
    inner: RwLock<Arc<SearchEngine<D>>>,
}

impl<D: Searchable> SharedEngine<D> {
    /// Wrap an engine
    pub fn new(engine: SearchEngine<D>) -> Self {
        SharedEngine {
            inner: RwLock::new(Arc::new(engine)),
        }
    }

    /// Snapshot of the current engine
    pub fn current(&self) -> Arc<SearchEngine<D>> {
        Arc::clone(&self.inner.read())
    }

    /// Swap in `engine`, returning the one it replaced
    pub fn replace(&self, engine: SearchEngine<D>) -> Arc<SearchEngine<D>> {
        let next = Arc::new(engine);
        std::mem::replace(&mut *self.inner.write(), next)
    }

    /// Index `docs` and swap the result in
    ///
    /// On error the current engine stays in place.
    pub fn rebuild(&self, docs: Vec<D>) -> Result<Arc<SearchEngine<D>>> {
        let engine = SearchEngine::new(docs)?;
        tracing::debug!(documents = engine.len(), "Replacing search engine");
        Ok(self.replace(engine))
    }
}
