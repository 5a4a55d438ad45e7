//! Behavior tree runtime built on `ai-core` and `ai-tree`.
//!
//! Trees are authored as [`ai_tree::Tree`]s (or depth-tagged flat lists) of
//! [`Behavior`]s and executed by a [`BehaviorTree`], which keeps an explicit
//! stack of active behaviors and ticks only the task on top of it.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod asset;
pub mod behavior;
pub mod composite;
pub mod config;
pub mod error;
pub mod runtime;
pub mod status;
pub mod targeted;
pub mod task;
pub mod timed;

pub use asset::{load_tree, NodeSpec, Param, Params, TaskFactory};
pub use behavior::{Behavior, BehaviorKind};
pub use composite::{CompositeKind, DecoratorKind};
pub use config::RuntimeConfig;
pub use error::{BuildError, TaskError, TaskResult};
pub use runtime::{BehaviorTree, RuntimeState, TRACE_CANCEL, TRACE_END, TRACE_RESTART, TRACE_START};
pub use status::{NodeState, Outcome, Status};
pub use targeted::{ArriveAt, TargetAction, Targeted};
pub use task::{EndReason, Task};
pub use timed::{Timed, TimedAction, Wait};
