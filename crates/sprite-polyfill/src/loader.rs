//! Sprite loader
//!
//! Resolves a sprite URL to a parsed document: from the cache when
//! possible, by joining a fetch already underway, or by issuing the one
//! fetch every concurrent caller then shares.

use std::future::Future;
use std::rc::Rc;

use sprite_net::{Fetch, Url, resolve_url};

use crate::{
    Diagnostic, Diagnostics, InFlightTracker, SpriteCache, SpriteDocument, SpriteError, SpriteStore,
};

/// Where components get sprite documents from
pub trait SpriteSource {
    fn load(&self, url: &str) -> impl Future<Output = Result<Rc<SpriteDocument>, SpriteError>>;
}

/// Single-flight, caching sprite loader
pub struct SpriteLoader<F> {
    fetcher: F,
    base: Url,
    store: Rc<SpriteStore>,
    diagnostics: Rc<Diagnostics>,
}

impl<F: Fetch> SpriteLoader<F> {
    pub fn new(fetcher: F, base: Url, store: Rc<SpriteStore>, diagnostics: Rc<Diagnostics>) -> Self {
        Self {
            fetcher,
            base,
            store,
            diagnostics,
        }
    }

    pub fn store(&self) -> &Rc<SpriteStore> {
        &self.store
    }

    pub fn cache(&self) -> &SpriteCache {
        self.store.cache()
    }

    pub fn in_flight(&self) -> &InFlightTracker {
        self.store.in_flight()
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load the sprite sheet at `url`
    ///
    /// The cache is keyed by `url` as given; only the fetch itself uses the
    /// absolute form. On failure nothing is cached, so a later call retries.
    pub async fn load(&self, url: &str) -> Result<Rc<SpriteDocument>, SpriteError> {
        if url.is_empty() {
            return Err(SpriteError::EmptyUrl);
        }

        if let Some(document) = self.cache().get(url) {
            return Ok(document);
        }

        if let Some(waiter) = self.in_flight().wait(url) {
            tracing::debug!("Joining in-flight fetch for {}", url);
            return waiter.recv().await.map_err(|_| SpriteError::Abandoned {
                url: url.to_string(),
            });
        }

        self.in_flight().begin(url);
        let flight = FlightGuard {
            tracker: self.in_flight(),
            url,
        };

        match self.fetch_document(url).await {
            Ok(document) => {
                let document = self.cache().insert(url, Rc::new(document));
                flight.complete(&document);
                Ok(document)
            }
            Err(err) => {
                self.diagnostics.emit(Diagnostic::FetchFailed {
                    url: url.to_string(),
                    reason: err.to_string(),
                });
                drop(flight);
                Err(err)
            }
        }
    }

    async fn fetch_document(&self, url: &str) -> Result<SpriteDocument, SpriteError> {
        let absolute = resolve_url(&self.base, url)?;
        let body = self.fetcher.fetch_text(&absolute).await?;
        Ok(SpriteDocument::parse(&body, absolute.as_str()))
    }
}

impl<F: Fetch> SpriteSource for SpriteLoader<F> {
    fn load(&self, url: &str) -> impl Future<Output = Result<Rc<SpriteDocument>, SpriteError>> {
        SpriteLoader::load(self, url)
    }
}

/// Clears the in-flight entry however the fetch ends, including when the
/// loading future is dropped mid-fetch
struct FlightGuard<'a> {
    tracker: &'a InFlightTracker,
    url: &'a str,
}

impl FlightGuard<'_> {
    fn complete(self, document: &Rc<SpriteDocument>) {
        let notified = self.tracker.complete(self.url, document);
        if notified > 0 {
            tracing::debug!("Shared {} with {} waiting consumers", self.url, notified);
        }
        std::mem::forget(self);
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let abandoned = self.tracker.abandon(self.url);
        if abandoned > 0 {
            tracing::debug!("Released {} consumers waiting on {}", abandoned, self.url);
        }
    }
}
