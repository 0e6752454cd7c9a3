//! DOM Tree (arena-based allocation)
//!
//! Removed subtrees hand their slots back through a free list, so a
//! surface that is repopulated over and over does not grow the arena.

use crate::{
    DomError, DomResult, ElementData, InternedString, Node, NodeData, NodeId, QualName,
    StringInterner,
};

/// Arena-based DOM tree for memory efficiency
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    interner: StringInterner,
    free: Vec<NodeId>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
            free: Vec::new(),
        }
    }

    /// Root (document) node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a live node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).filter(|n| !n.is_vacant())
    }

    /// Get a mutable live node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).filter(|n| !n.is_vacant())
    }

    /// Generation of a live node
    ///
    /// A slot released by `remove_child` and handed out again reports a
    /// different generation, so a stored `(NodeId, generation)` pair never
    /// matches the node that replaced it.
    pub fn generation(&self, id: NodeId) -> Option<u32> {
        self.get(id).map(|n| n.generation)
    }

    /// Whether `id` still names the node that had `generation`
    pub fn is_current(&self, id: NodeId, generation: Option<u32>) -> bool {
        generation.is_some() && self.generation(id) == generation
    }

    /// Number of live nodes in the tree, root included
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated arena slots, live or vacant
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut StringInterner {
        &mut self.interner
    }

    /// Resolve an interned string
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    /// Place a node into the arena, reusing a vacant slot when possible
    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            let slot = &mut self.nodes[id.index()];
            let generation = slot.generation;
            *slot = node;
            slot.generation = generation;
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element with no namespace
    pub fn create_element(&mut self, local: &str) -> NodeId {
        self.create_element_ns("", local)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, ns: &str, local: &str) -> NodeId {
        let ns = self.interner.intern(ns);
        let local = self.interner.intern(local);
        self.alloc(Node::element(QualName::new(ns, local)))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text.to_string())))
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        if self.get(child).is_none() {
            return Err(DomError::NotFound(child));
        }
        if child == NodeId::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        Ok(())
    }

    /// Remove `child` from `parent` and release the whole subtree
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        match self.get(child) {
            Some(node) if node.parent == parent => {}
            Some(_) => return Err(DomError::NotAChild { parent, child }),
            None => return Err(DomError::NotFound(child)),
        }

        self.detach(child);
        self.release_subtree(child);
        Ok(())
    }

    /// Unlink a node from its parent and siblings, keeping its subtree
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Mark a detached subtree vacant and queue its slots for reuse
    fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(self.child_ids(current));
            let slot = &mut self.nodes[current.index()];
            let generation = slot.generation.wrapping_add(1);
            *slot = Node::new(NodeData::Vacant);
            slot.generation = generation;
            self.free.push(current);
        }
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// Snapshot the child IDs of a node
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Tag (local) name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name.local))
    }

    /// Read an attribute by local name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.element(id)?.get_attr(name)
    }

    /// Set an attribute (no namespace) on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let qname = QualName::new(InternedString::EMPTY, self.interner.intern(name));
        self.set_attribute_qualified(id, qname, value)
    }

    /// Set a fully qualified attribute on an element
    pub fn set_attribute_qualified(&mut self, id: NodeId, name: QualName, value: &str) -> DomResult<()> {
        let is_id = self.resolve(name.local) == "id" && name.ns == InternedString::EMPTY;
        let cached_id = is_id.then(|| self.interner.intern(value));

        let elem = self
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType(id))?;

        // An existing attribute keeps its qualified name when set by local name
        match elem.attrs.iter_mut().find(|a| a.name.local == name.local) {
            Some(attr) => attr.value = value.to_string(),
            None => elem.set_attr(name, value.to_string()),
        }
        if let Some(cached) = cached_id {
            elem.id = Some(cached);
        }
        Ok(())
    }

    /// Deep-clone a node of another tree into this one
    ///
    /// Names are re-interned into this tree's interner. The returned node is
    /// detached; append it where it belongs.
    pub fn import_subtree(&mut self, source: &DomTree, node: NodeId) -> DomResult<NodeId> {
        let src = source.get(node).ok_or(DomError::NotFound(node))?;

        let data = match &src.data {
            NodeData::Element(elem) => NodeData::Element(self.import_element(source, elem)),
            NodeData::Text(text) => NodeData::Text(text.clone()),
            NodeData::Comment(text) => NodeData::Comment(text.clone()),
            NodeData::Doctype { name, public_id, system_id } => NodeData::Doctype {
                name: self.interner.intern(source.resolve(*name)),
                public_id: public_id.clone(),
                system_id: system_id.clone(),
            },
            NodeData::Document | NodeData::Vacant => return Err(DomError::InvalidNodeType(node)),
        };

        let copy = self.alloc(Node::new(data));
        for child in source.child_ids(node) {
            let child_copy = self.import_subtree(source, child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    fn import_name(&mut self, source: &DomTree, name: QualName) -> QualName {
        QualName {
            prefix: self.interner.intern(source.resolve(name.prefix)),
            ns: self.interner.intern(source.resolve(name.ns)),
            local: self.interner.intern(source.resolve(name.local)),
        }
    }

    fn import_element(&mut self, source: &DomTree, elem: &ElementData) -> ElementData {
        let mut copy = ElementData::new(self.import_name(source, elem.name));
        for attr in &elem.attrs {
            let name = self.import_name(source, attr.name);
            copy.set_attr(name, attr.value.clone());
        }
        copy.id = elem.id.map(|id| self.interner.intern(source.resolve(id)));
        copy
    }

    /// Approximate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.free.capacity() * std::mem::size_of::<NodeId>()
            + self.interner.memory_usage()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
