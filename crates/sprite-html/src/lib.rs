//! Sprite sheet parser
//!
//! Sprite sheets are parsed the way a browser parses markup assigned to a
//! document body: with html5ever, whose foreign-content rules keep SVG
//! namespaces and camel-cased attributes such as `viewBox` intact.

mod parser;
mod serializer;

pub use parser::SpriteParser;
pub use serializer::{MarkupSerializer, inner_markup, outer_markup};

pub use sprite_dom::Document;

/// Parse a sprite sheet body into a document
pub fn parse(body: &str) -> Document {
    SpriteParser::new().parse(body)
}
