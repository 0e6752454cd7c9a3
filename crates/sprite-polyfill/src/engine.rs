//! Engine - composition root
//!
//! Owns the detector, the sprite store, the diagnostics sink and the loader,
//! and hands out components wired to them.

use std::rc::Rc;

use sprite_dom::DisplaySurface;
use sprite_net::{Fetch, HttpFetcher, Url};

use crate::{
    Config, ConfigError, Diagnostics, EnvironmentDetector, PolyfillUse, SpriteCache, SpriteLoader,
    SpriteStore, UseProps,
};

/// The sprite polyfill engine
pub struct SpriteEngine<F> {
    config: Config,
    detector: EnvironmentDetector,
    diagnostics: Rc<Diagnostics>,
    loader: SpriteLoader<F>,
}

impl SpriteEngine<HttpFetcher> {
    /// Build an engine that fetches over HTTP
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::with_config(config.fetcher_config())?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetch> SpriteEngine<F> {
    /// Build an engine around any fetch capability
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, ConfigError> {
        let base = config.base()?;
        Ok(Self::with_parts(config, fetcher, base, Rc::new(SpriteStore::new())))
    }

    /// Build an engine sharing an existing sprite store
    ///
    /// Engines built on the same store share cached sprites and join each
    /// other's pending fetches.
    pub fn with_parts(config: Config, fetcher: F, base: Url, store: Rc<SpriteStore>) -> Self {
        let diagnostics = Rc::new(Diagnostics::new(config.diagnostics_enabled()));
        let detector = EnvironmentDetector::new(config.environment());
        let loader = SpriteLoader::new(fetcher, base, store, diagnostics.clone());

        tracing::info!(
            "sprite-polyfill {} initialized (polyfill required: {})",
            crate::VERSION,
            detector.requires_polyfill()
        );

        Self {
            config,
            detector,
            diagnostics,
            loader,
        }
    }

    /// New `<use>` instance; the configured force flag applies on top of the props
    pub fn component<S: DisplaySurface>(&self, mut props: UseProps) -> PolyfillUse<S> {
        props.force_polyfill |= self.config.force_polyfill;
        PolyfillUse::new(props, &self.detector, self.diagnostics.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn detector(&self) -> &EnvironmentDetector {
        &self.detector
    }

    pub fn diagnostics(&self) -> &Rc<Diagnostics> {
        &self.diagnostics
    }

    pub fn loader(&self) -> &SpriteLoader<F> {
        &self.loader
    }

    pub fn store(&self) -> &Rc<SpriteStore> {
        self.loader.store()
    }

    pub fn cache(&self) -> &SpriteCache {
        self.loader.cache()
    }
}
