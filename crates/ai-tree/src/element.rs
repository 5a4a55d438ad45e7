use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Depth of the structural root. Its children sit at depth 0.
pub const ROOT_DEPTH: i32 = -1;

/// Index of a node inside its [`Tree`](crate::Tree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One node of a tree: its depth, its links and its payload.
///
/// Links are public so list editors can rewire nodes directly; use
/// [`Tree::assert_integrity`](crate::Tree::assert_integrity) and
/// [`Tree::repair`](crate::Tree::repair) after doing so.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeElement<T> {
    pub depth: i32,
    /// Lookup only; the parent owns this node, never the other way around.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: T,
}

impl<T> TreeElement<T> {
    pub fn new(depth: i32, parent: Option<NodeId>, data: T) -> Self {
        Self {
            depth,
            parent,
            children: Vec::new(),
            data,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A row of the flattened, pre-order form of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlatNode<T> {
    pub depth: i32,
    pub data: T,
}

impl<T> FlatNode<T> {
    pub fn new(depth: i32, data: T) -> Self {
        Self { depth, data }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FlatNode<U> {
        FlatNode {
            depth: self.depth,
            data: f(self.data),
        }
    }
}
