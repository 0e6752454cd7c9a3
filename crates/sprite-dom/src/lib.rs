//! Sprite DOM - Document Object Model
//!
//! Arena-backed tree used both for parsed sprite sheets and for the host
//! documents that symbols get transplanted into.

mod document;
mod error;
mod interner;
mod node;
mod surface;
mod tree;

pub use document::Document;
pub use error::{DomError, DomResult};
pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, QualName};
pub use surface::{DisplaySurface, NodeSurface, SharedSurface};
pub use tree::{Children, DomTree};

/// Namespace URI of SVG elements
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Namespace URI of `xlink:*` attributes
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
