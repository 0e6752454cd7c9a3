//! Sprite references
//!
//! `icons.svg#close` names the sprite sheet `icons.svg` and the symbol
//! `close` inside it.

use std::fmt;

use crate::{Diagnostic, Diagnostics};

/// A sprite sheet URL plus a symbol identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SpriteRef {
    pub url: String,
    pub symbol_id: String,
}

impl SpriteRef {
    /// Split on the first `#`; any later `#` belongs to the symbol id
    pub fn split(href: &str) -> Self {
        match href.split_once('#') {
            Some((url, symbol_id)) => Self {
                url: url.to_string(),
                symbol_id: symbol_id.to_string(),
            },
            None => Self {
                url: href.to_string(),
                symbol_id: String::new(),
            },
        }
    }

    /// Validate and split an optional href
    ///
    /// A missing or empty href yields an empty reference and a diagnostic.
    pub fn parse(href: Option<&str>, diagnostics: &Diagnostics) -> Self {
        match href {
            Some(href) if !href.is_empty() => Self::split(href),
            other => {
                diagnostics.emit(Diagnostic::InvalidHref {
                    href: other.map(str::to_string),
                });
                Self::default()
            }
        }
    }

    /// Whether a sprite sheet has to be fetched for this reference
    pub fn needs_fetch(&self) -> bool {
        !self.url.is_empty()
    }

    /// Neither a URL nor a symbol
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.symbol_id.is_empty()
    }
}

impl fmt::Display for SpriteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)?;
        if !self.symbol_id.is_empty() {
            write!(f, "#{}", self.symbol_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_url_and_symbol() {
        let r = SpriteRef::split("icons.svg#close");
        assert_eq!(r.url, "icons.svg");
        assert_eq!(r.symbol_id, "close");
        assert!(r.needs_fetch());
    }

    #[test]
    fn test_split_keeps_later_hashes() {
        let r = SpriteRef::split("icons.svg#a#b");
        assert_eq!(r.url, "icons.svg");
        assert_eq!(r.symbol_id, "a#b");
    }

    #[test]
    fn test_split_without_hash() {
        let r = SpriteRef::split("icons.svg");
        assert_eq!(r.url, "icons.svg");
        assert_eq!(r.symbol_id, "");
    }

    #[test]
    fn test_local_reference() {
        let r = SpriteRef::split("#close");
        assert!(!r.needs_fetch());
        assert_eq!(r.symbol_id, "close");
    }

    #[test]
    fn test_parse_missing_or_empty() {
        let diagnostics = Diagnostics::new(true);

        assert!(SpriteRef::parse(None, &diagnostics).is_empty());
        assert!(SpriteRef::parse(Some(""), &diagnostics).is_empty());
        assert_eq!(
            diagnostics.records(),
            vec![
                Diagnostic::InvalidHref { href: None },
                Diagnostic::InvalidHref { href: Some(String::new()) },
            ]
        );
    }

    #[test]
    fn test_parse_valid_is_quiet() {
        let diagnostics = Diagnostics::new(true);
        let r = SpriteRef::parse(Some("sprite.svg#menu"), &diagnostics);

        assert_eq!(r.to_string(), "sprite.svg#menu");
        assert!(diagnostics.records().is_empty());
    }
}
