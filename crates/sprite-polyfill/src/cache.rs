//! Sprite cache
//!
//! URL → parsed sprite document, never evicted. Constructed by the
//! composition root and shared by reference, so tests get a fresh one each.
//! `SpriteStore` pairs the cache with the fetches still underway.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{InFlightTracker, SpriteDocument};

/// Parsed sprite documents keyed by sprite URL
#[derive(Debug, Default)]
pub struct SpriteCache {
    entries: RefCell<HashMap<String, Rc<SpriteDocument>>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached document
    pub fn get(&self, url: &str) -> Option<Rc<SpriteDocument>> {
        self.entries.borrow().get(url).cloned()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.borrow().contains_key(url)
    }

    /// Store a document unless one is already cached for `url`
    ///
    /// Returns the document that ends up cached. The first writer wins, so a
    /// URL keeps a single document identity for the cache's lifetime.
    pub fn insert(&self, url: &str, document: Rc<SpriteDocument>) -> Rc<SpriteDocument> {
        let mut entries = self.entries.borrow_mut();
        if let Some(existing) = entries.get(url) {
            tracing::debug!("Sprite {} already cached, discarding duplicate parse", url);
            return existing.clone();
        }
        entries.insert(url.to_string(), document.clone());
        document
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Cached URLs, sorted
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<_> = self.entries.borrow().keys().cloned().collect();
        urls.sort();
        urls
    }
}

/// Cached documents plus in-flight fetches, shared as one unit
///
/// Every loader holding the same store sees the same cache entries and
/// joins the same pending fetches, so a URL is fetched once per store.
#[derive(Debug, Default)]
pub struct SpriteStore {
    cache: SpriteCache,
    in_flight: InFlightTracker,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &SpriteCache {
        &self.cache
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        &self.in_flight
    }
}
