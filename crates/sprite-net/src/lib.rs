//! Sprite networking
//!
//! The fetch capability the sprite loader consumes, plus an HTTP
//! implementation of it.

mod client;
mod fetch;

pub use client::{FetcherConfig, HttpFetcher};
pub use fetch::{Fetch, resolve_url};
pub use url::Url;

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for NetError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => NetError::HttpError { status: status.as_u16() },
            None => NetError::Network(err.to_string()),
        }
    }
}
