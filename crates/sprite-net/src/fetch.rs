//! Fetch capability
//!
//! Given an absolute URL, asynchronously yield the raw text body or an error.

use std::future::Future;
use std::rc::Rc;

use url::Url;

use crate::NetError;

/// Something that can fetch a sprite sheet body
pub trait Fetch {
    /// Fetch `url` and return its full body as text
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, NetError>>;
}

impl<F: Fetch + ?Sized> Fetch for Rc<F> {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, NetError>> {
        (**self).fetch_text(url)
    }
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = Result<String, NetError>> {
        (**self).fetch_text(url)
    }
}

/// Resolve a possibly relative reference against a base URL
pub fn resolve_url(base: &Url, href: &str) -> Result<Url, NetError> {
    base.join(href)
        .map_err(|err| NetError::InvalidUrl(format!("{href}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let base = Url::parse("https://example.com/app/page.html").unwrap();
        let url = resolve_url(&base, "icons.svg").unwrap();
        assert_eq!(url.as_str(), "https://example.com/app/icons.svg");
    }

    #[test]
    fn test_resolve_root_relative() {
        let base = Url::parse("https://example.com/app/page.html").unwrap();
        let url = resolve_url(&base, "/static/sprite.svg").unwrap();
        assert_eq!(url.as_str(), "https://example.com/static/sprite.svg");
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let base = Url::parse("https://example.com/").unwrap();
        let url = resolve_url(&base, "https://cdn.example.org/s.svg").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.org/s.svg");
    }

    #[test]
    fn test_resolve_against_opaque_base_fails() {
        let base = Url::parse("about:blank").unwrap();
        assert!(matches!(
            resolve_url(&base, "icons.svg"),
            Err(NetError::InvalidUrl(_))
        ));
    }
}
