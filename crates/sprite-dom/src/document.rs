//! Document - High-level document API

use crate::{DomTree, InternedString, NodeId};

/// A parsed or host document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut document = Self::empty(url);
        let tree = &mut document.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached elements under a fresh root cannot fail to link
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        document.html_element = html;
        document.head_element = head;
        document.body_element = body;
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree has been built externally
    pub fn finalize(&mut self) {
        self.html_element = self.find_child_element(NodeId::ROOT, "html");
        if self.html_element.is_valid() {
            self.head_element = self.find_child_element(self.html_element, "head");
            self.body_element = self.find_child_element(self.html_element, "body");
        }
    }

    fn find_child_element(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .child_ids(parent)
            .into_iter()
            .find(|&id| self.tree.tag_name(id) == Some(tag))
            .unwrap_or(NodeId::NONE)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    ///
    /// An empty ID never matches, as in the DOM.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        let id_interned = self.tree.interner().lookup(id)?;
        self.find_element_with_id(NodeId::ROOT, id_interned)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: InternedString) -> Option<NodeId> {
        // Iterative pre-order walk; sprite sheets can nest deeply
        let mut stack: Vec<NodeId> = self.tree.child_ids(start).into_iter().rev().collect();
        while let Some(node_id) = stack.pop() {
            if let Some(elem) = self.tree.element(node_id) {
                if elem.id == Some(target_id) {
                    return Some(node_id);
                }
            }
            stack.extend(self.tree.child_ids(node_id).into_iter().rev());
        }
        None
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.tree.memory_usage() + self.url.capacity()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
