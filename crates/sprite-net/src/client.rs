//! HTTP fetcher
//!
//! Blocking reqwest client driven from smol's blocking pool, so the fetch
//! future stays executor-agnostic. `file:` URLs are read from disk.

use std::future::Future;
use std::time::Duration;

use url::Url;

use crate::{Fetch, NetError};

/// Fetcher configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent header sent with requests
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Max redirects to follow (0 = disable)
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sprite-polyfill/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
        }
    }
}

/// Fetch sprites over HTTP(S) or from the local filesystem
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self, NetError> {
        Self::with_config(FetcherConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: FetcherConfig) -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_http(&self, url: Url) -> Result<String, NetError> {
        tracing::info!("HTTP GET {}", url);
        let client = self.client.clone();

        smol::unblock(move || {
            let response = client.get(url.as_str()).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(NetError::HttpError { status: status.as_u16() });
            }
            Ok(response.text()?)
        })
        .await
    }

    async fn fetch_file(&self, url: Url) -> Result<String, NetError> {
        let path = url
            .to_file_path()
            .map_err(|()| NetError::InvalidUrl(url.to_string()))?;
        tracing::debug!("Reading sprite from {}", path.display());

        Ok(smol::fs::read_to_string(path).await?)
    }
}

impl Fetch for HttpFetcher {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, NetError>> {
        let url = url.clone();
        async move {
            match url.scheme() {
                "http" | "https" => self.fetch_http(url).await,
                "file" => self.fetch_file(url).await,
                other => Err(NetError::UnsupportedScheme(other.to_string())),
            }
        }
    }
}
