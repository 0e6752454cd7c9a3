//! Error types

use sprite_net::NetError;

/// Sprite loading error
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("Failed to fetch sprite: {0}")]
    Net(#[from] NetError),

    #[error("Sprite request for {url} failed before a document arrived")]
    Abandoned { url: String },

    #[error("Empty sprite URL")]
    EmptyUrl,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Network setup failed: {0}")]
    Net(#[from] NetError),
}
