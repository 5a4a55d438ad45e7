use thiserror::Error;

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid tree depth at list index {index}: {violation}")]
    InvalidTreeDepth {
        index: usize,
        violation: DepthViolation,
    },

    #[error("tree integrity violation: {0}")]
    TreeIntegrity(IntegrityViolation),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("the root node cannot be removed")]
    RootRemoval,

    #[error("cannot move {node} under its own descendant {parent}")]
    CyclicMove { node: NodeId, parent: NodeId },
}

/// Why a flat list cannot describe a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepthViolation {
    #[error("the list is empty")]
    EmptyList,

    #[error("the first element must have depth -1, found {found}")]
    RootDepth { found: i32 },

    #[error("only the first element may have a negative depth, found {found}")]
    NegativeDepth { found: i32 },

    #[error("depth jumps from {previous} to {found}; it may grow by at most one per row")]
    DepthJump { previous: i32, found: i32 },
}

/// First broken invariant found by [`Tree::assert_integrity`](crate::Tree::assert_integrity).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("root {root} has depth {found}, expected -1")]
    RootDepth { root: NodeId, found: i32 },

    #[error("root {root} has a parent {parent}")]
    RootHasParent { root: NodeId, parent: NodeId },

    #[error("{parent} lists missing child {child}")]
    DanglingChild { parent: NodeId, child: NodeId },

    #[error("{child} is reachable twice (second time through {parent})")]
    SharedChild { parent: NodeId, child: NodeId },

    #[error("{node} points at parent {found:?}, but is a child of {expected}")]
    ParentMismatch {
        node: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },

    #[error("{node} has depth {found}, expected {expected}")]
    DepthMismatch {
        node: NodeId,
        expected: i32,
        found: i32,
    },

    #[error("{node} is not reachable from the root")]
    Unreachable { node: NodeId },
}

impl From<IntegrityViolation> for TreeError {
    fn from(value: IntegrityViolation) -> Self {
        TreeError::TreeIntegrity(value)
    }
}
