//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the sprite DOM format.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use sprite_dom::{Document, DomTree, ElementData, Node, NodeData, NodeId, QualName};

/// Sprite sheet parser
pub struct SpriteParser;

impl SpriteParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a sprite body into a Document
    pub fn parse(&self, body: &str) -> Document {
        self.parse_with_url(body, "about:blank")
    }

    /// Parse a sprite body fetched from `url`
    pub fn parse_with_url(&self, body: &str, url: &str) -> Document {
        tracing::debug!("Parsing sprite document: {}", url);

        let mut document = Document::empty(url);

        let dom = match parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut body.as_bytes())
        {
            Ok(dom) => dom,
            Err(err) => {
                tracing::warn!("Sprite {} could not be read: {}", url, err);
                return document;
            }
        };

        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);
        document.finalize();

        tracing::debug!("Parsed {} nodes from {}", document.tree().len(), url);
        document
    }

    /// Convert an RcDom node into the tree under `parent`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                let name = tree.interner_mut().intern(name);
                let id = tree.alloc(Node::new(NodeData::Doctype {
                    name,
                    public_id: public_id.to_string(),
                    system_id: system_id.to_string(),
                }));
                self.link(tree, parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                // Whitespace between symbols carries no rendering
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    self.link(tree, parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                self.link(tree, parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let interner = tree.interner_mut();
                let qname = QualName::new(interner.intern(&name.ns), interner.intern(&name.local));
                let mut elem = ElementData::new(qname);

                for attr in attrs.borrow().iter() {
                    let prefix = attr.name.prefix.as_deref().unwrap_or("");
                    let attr_name = QualName::new(
                        interner.intern(&attr.name.ns),
                        interner.intern(&attr.name.local),
                    )
                    .with_prefix(interner.intern(prefix));

                    if &*attr.name.local == "id" {
                        elem.id = Some(interner.intern(&attr.value));
                    }
                    elem.set_attr(attr_name, attr.value.to_string());
                }

                let id = tree.alloc(Node::new(NodeData::Element(elem)));
                self.link(tree, parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {
                // Processing instructions never render
            }
        }
    }

    fn link(&self, tree: &mut DomTree, parent: NodeId, child: NodeId) {
        if let Err(err) = tree.append_child(parent, child) {
            tracing::warn!("Dropping parsed node: {}", err);
        }
    }
}

impl Default for SpriteParser {
    fn default() -> Self {
        Self::new()
    }
}
