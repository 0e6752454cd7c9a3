//! Parsed sprite documents

use sprite_dom::{Document, DomTree, NodeId};
use sprite_html::SpriteParser;

/// A parsed sprite sheet, queryable by symbol id
///
/// Only shared references are handed out, so one instance can safely back
/// every consumer of the same URL.
#[derive(Debug)]
pub struct SpriteDocument {
    document: Document,
}

impl SpriteDocument {
    /// Parse a raw sprite body fetched from `url`
    pub fn parse(body: &str, url: &str) -> Self {
        Self::from_document(SpriteParser::new().parse_with_url(body, url))
    }

    /// Wrap an already built document, e.g. the host page itself
    pub fn from_document(document: Document) -> Self {
        Self { document }
    }

    /// Find a symbol (any element) by id
    pub fn symbol(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id)
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn url(&self) -> &str {
        self.document.url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        let doc = SpriteDocument::parse(
            r#"<svg><symbol id="menu"><path d="M0 0"/></symbol></svg>"#,
            "https://example.com/icons.svg",
        );

        assert!(doc.symbol("menu").is_some());
        assert!(doc.symbol("close").is_none());
        assert!(doc.symbol("").is_none());
        assert_eq!(doc.url(), "https://example.com/icons.svg");
    }
}
