//! Display surfaces
//!
//! A display surface is the element a symbol's content is rendered into.
//! The host owns it; transplanting only edits its attributes and children.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{Document, DomTree, NodeId};

/// Mutable rendering-tree node supplied by the host
pub trait DisplaySurface {
    /// Whether the surface is still part of a live document
    fn is_attached(&self) -> bool;

    /// Read an attribute
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute, overwriting any prior value
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Current children, in order
    fn children(&self) -> Vec<NodeId>;

    /// Remove a child and everything below it
    fn remove_child(&mut self, child: NodeId);

    /// Deep-clone `node` from `source` and append the copy as the last child
    fn append_clone(&mut self, source: &DomTree, node: NodeId) -> Option<NodeId>;

    /// Remove every child
    fn clear_children(&mut self) {
        for child in self.children() {
            self.remove_child(child);
        }
    }
}

/// Surface over a node of a tree borrowed for the duration of an edit
pub struct NodeSurface<'a> {
    tree: &'a mut DomTree,
    node: NodeId,
    generation: Option<u32>,
}

impl<'a> NodeSurface<'a> {
    pub fn new(tree: &'a mut DomTree, node: NodeId) -> Self {
        let generation = tree.generation(node);
        Self { tree, node, generation }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The node this surface was created for is still in its slot
    fn is_live(&self) -> bool {
        self.tree.is_current(self.node, self.generation)
    }
}

impl DisplaySurface for NodeSurface<'_> {
    fn is_attached(&self) -> bool {
        self.is_live() && self.tree.is_connected(self.node)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if !self.is_live() {
            return None;
        }
        self.tree.get_attribute(self.node, name).map(str::to_string)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if !self.is_live() {
            return;
        }
        if let Err(err) = self.tree.set_attribute(self.node, name, value) {
            tracing::debug!("Surface attribute {} not set: {}", name, err);
        }
    }

    fn children(&self) -> Vec<NodeId> {
        if !self.is_live() {
            return Vec::new();
        }
        self.tree.child_ids(self.node)
    }

    fn remove_child(&mut self, child: NodeId) {
        if !self.is_live() {
            return;
        }
        if let Err(err) = self.tree.remove_child(self.node, child) {
            tracing::debug!("Surface child not removed: {}", err);
        }
    }

    fn append_clone(&mut self, source: &DomTree, node: NodeId) -> Option<NodeId> {
        if !self.is_live() {
            return None;
        }
        append_imported(self.tree, self.node, source, node)
    }
}

/// Surface over a node of a shared host document
///
/// Holds the document weakly and remembers the generation of its node.
/// Once the host drops the document, or removes the node from it (even if
/// the slot is later reused for another node), the surface reports itself
/// detached and every edit becomes a no-op.
#[derive(Debug, Clone)]
pub struct SharedSurface {
    document: Weak<RefCell<Document>>,
    node: NodeId,
    generation: Option<u32>,
}

impl SharedSurface {
    pub fn new(document: &Rc<RefCell<Document>>, node: NodeId) -> Self {
        let generation = document
            .try_borrow()
            .ok()
            .and_then(|doc| doc.tree().generation(node));
        Self {
            document: Rc::downgrade(document),
            node,
            generation,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> Option<R> {
        let document = self.document.upgrade()?;
        let document = document.try_borrow().ok()?;
        let tree = document.tree();
        tree.is_current(self.node, self.generation).then(|| f(tree))
    }

    fn with_tree_mut<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> Option<R> {
        let document = self.document.upgrade()?;
        let mut document = document.try_borrow_mut().ok()?;
        let tree = document.tree_mut();
        if !tree.is_current(self.node, self.generation) {
            return None;
        }
        Some(f(tree))
    }
}

impl DisplaySurface for SharedSurface {
    fn is_attached(&self) -> bool {
        self.with_tree(|tree| tree.is_connected(self.node)).unwrap_or(false)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.with_tree(|tree| tree.get_attribute(self.node, name).map(str::to_string))
            .flatten()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let node = self.node;
        self.with_tree_mut(|tree| NodeSurface::new(tree, node).set_attribute(name, value));
    }

    fn children(&self) -> Vec<NodeId> {
        self.with_tree(|tree| tree.child_ids(self.node)).unwrap_or_default()
    }

    fn remove_child(&mut self, child: NodeId) {
        let node = self.node;
        self.with_tree_mut(|tree| NodeSurface::new(tree, node).remove_child(child));
    }

    fn append_clone(&mut self, source: &DomTree, node: NodeId) -> Option<NodeId> {
        let target = self.node;
        self.with_tree_mut(|tree| append_imported(tree, target, source, node))
            .flatten()
    }
}

fn append_imported(tree: &mut DomTree, parent: NodeId, source: &DomTree, node: NodeId) -> Option<NodeId> {
    let copy = match tree.import_subtree(source, node) {
        Ok(copy) => copy,
        Err(err) => {
            tracing::debug!("Cannot clone {:?} into surface: {}", node, err);
            return None;
        }
    };
    match tree.append_child(parent, copy) {
        Ok(()) => Some(copy),
        Err(err) => {
            tracing::debug!("Cannot append clone to surface: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> (Rc<RefCell<Document>>, NodeId) {
        let document = Rc::new(RefCell::new(Document::new("about:blank")));
        let node = {
            let mut doc = document.borrow_mut();
            let body = doc.body();
            let tree = doc.tree_mut();
            let svg = tree.create_element("svg");
            tree.append_child(body, svg).unwrap();
            svg
        };
        (document, node)
    }

    #[test]
    fn test_shared_surface_edits_document() {
        let (document, node) = host();
        let mut surface = SharedSurface::new(&document, node);

        assert!(surface.is_attached());
        surface.set_attribute("viewBox", "0 0 24 24");
        assert_eq!(surface.attribute("viewBox").as_deref(), Some("0 0 24 24"));
    }

    #[test]
    fn test_shared_surface_detached_after_drop() {
        let (document, node) = host();
        let mut surface = SharedSurface::new(&document, node);
        drop(document);

        assert!(!surface.is_attached());
        surface.set_attribute("viewBox", "0 0 1 1");
        assert!(surface.attribute("viewBox").is_none());
        assert!(surface.children().is_empty());
    }

    #[test]
    fn test_shared_surface_detached_after_removal() {
        let (document, node) = host();
        let surface = SharedSurface::new(&document, node);
        document.borrow_mut().tree_mut().detach(node);

        assert!(!surface.is_attached());
    }

    #[test]
    fn test_shared_surface_not_fooled_by_recycled_slot() {
        let (document, node) = host();
        let mut surface = SharedSurface::new(&document, node);

        let replacement = {
            let mut doc = document.borrow_mut();
            let body = doc.body();
            let tree = doc.tree_mut();
            tree.remove_child(body, node).unwrap();
            let p = tree.create_element("p");
            tree.append_child(body, p).unwrap();
            p
        };
        assert_eq!(replacement, node);

        assert!(!surface.is_attached());
        surface.set_attribute("viewBox", "0 0 24 24");
        let mut source = DomTree::new();
        let path = source.create_element("path");
        assert_eq!(surface.append_clone(&source, path), None);

        let doc = document.borrow();
        assert_eq!(doc.tree().get_attribute(replacement, "viewBox"), None);
        assert!(doc.tree().child_ids(replacement).is_empty());
    }

    #[test]
    fn test_node_surface_ignores_stale_slot() {
        let mut tree = DomTree::new();
        let svg = tree.create_element("svg");
        tree.append_child(tree.root(), svg).unwrap();

        let mut surface = NodeSurface::new(&mut tree, svg);
        surface.tree.remove_child(NodeId::ROOT, svg).unwrap();
        let reused = surface.tree.create_element("g");
        surface.tree.append_child(NodeId::ROOT, reused).unwrap();

        assert_eq!(reused, svg);
        assert!(!surface.is_attached());
        surface.set_attribute("class", "icon");
        assert_eq!(tree.get_attribute(reused, "class"), None);
    }

    #[test]
    fn test_clear_children() {
        let mut tree = DomTree::new();
        let svg = tree.create_element("svg");
        tree.append_child(tree.root(), svg).unwrap();
        for _ in 0..3 {
            let path = tree.create_element("path");
            tree.append_child(svg, path).unwrap();
        }

        let mut surface = NodeSurface::new(&mut tree, svg);
        surface.clear_children();
        assert!(surface.children().is_empty());
    }
}
