//! Sprite polyfill
//!
//! Reproduces cross-document SVG `<use href="sprite.svg#id">` on runtimes
//! that cannot render it: the sprite sheet is fetched once per URL, parsed,
//! cached, and the requested symbol's content is copied into an inert
//! `<svg>` surface.
//!
//! # Example
//! ```rust,ignore
//! use sprite_polyfill::{Config, SpriteEngine, UseProps};
//!
//! let engine = SpriteEngine::from_config(Config::default())?;
//! let mut icon = engine.component(UseProps::new("icons.svg#close"));
//! let node = icon.render(host.borrow_mut().tree_mut(), body)?;
//! icon.attach(SharedSurface::new(&host, node));
//! icon.synchronize(engine.loader()).await;
//! ```

mod cache;
mod config;
mod diagnostics;
mod document;
mod engine;
mod environment;
mod error;
mod in_flight;
mod link;
mod loader;
mod polyfill;
mod transplant;

pub use cache::{SpriteCache, SpriteStore};
pub use config::Config;
pub use diagnostics::{Diagnostic, Diagnostics, MAX_RECORDS};
pub use document::SpriteDocument;
pub use engine::SpriteEngine;
pub use environment::{Environment, EnvironmentDetector, requires_polyfill};
pub use error::{ConfigError, SpriteError};
pub use in_flight::InFlightTracker;
pub use link::SpriteRef;
pub use loader::{SpriteLoader, SpriteSource};
pub use polyfill::{PolyfillUse, RenderMode, SyncOutcome, UseProps, native_href};
pub use transplant::insert_symbol;

// Re-export sub-crates for hosts
pub use sprite_dom as dom;
pub use sprite_html as html;
pub use sprite_net as net;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
