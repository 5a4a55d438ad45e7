//! Ordered tree storage shared by the behavior runtime and list-based editors.
//!
//! A [`Tree`] keeps its nodes in an arena; parent and child links are
//! [`NodeId`] indices, so there is no shared ownership and no cycles through
//! `Rc`. The same tree can be flattened into a depth-tagged pre-order list of
//! [`FlatNode`]s and rebuilt from one.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod integrity;
pub mod list;
pub mod tree;

pub use element::{FlatNode, NodeId, TreeElement, ROOT_DEPTH};
pub use error::{DepthViolation, IntegrityViolation, TreeError};
pub use integrity::RepairReport;
pub use list::{normalize_depths, validate_depths};
pub use tree::Tree;
