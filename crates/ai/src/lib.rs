//! Umbrella crate that re-exports the `ai-*` building blocks.
//!
//! - [`tree`]: ordered arena trees and their flat-list form
//! - [`bt`]: the behavior tree runtime
//! - [`core`]: agents, ticks and the scoped blackboard
//! - [`nav`]: navigation collaborator interfaces
//! - [`tools`]: trace events

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tree")]
#[cfg_attr(docsrs, doc(cfg(feature = "tree")))]
pub use ai_tree as tree;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ai_nav as nav;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use ai_bt as bt;

/// Everything needed to build and tick a tree.
#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub mod prelude {
    pub use ai_bt::{
        ArriveAt, Behavior, BehaviorTree, EndReason, RuntimeConfig, Status, Task, TaskError,
        TaskResult, Timed, TimedAction, Wait,
    };
    pub use ai_core::{Blackboard, Blackboards, Reference, Scope, TickContext, WorldMut, WorldView};
    pub use ai_nav::{NavWorldMut, NavWorldView, Vec3};
    pub use ai_tree::{FlatNode, NodeId, Tree};
}
