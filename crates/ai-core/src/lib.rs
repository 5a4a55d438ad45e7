//! Deterministic, engine-agnostic AI kernel primitives.
//!
//! Holds the pieces every behavior crate agrees on: agent handles, the world
//! access traits, the per-tick context and the scoped blackboard.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod error;
pub mod tick;
pub mod world;

pub use blackboard::{Blackboard, Blackboards, Reference, Scope};
pub use error::BlackboardError;
pub use tick::TickContext;
pub use world::{AgentId, WorldMut, WorldView};
