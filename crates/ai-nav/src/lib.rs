//! Navigation collaborator interfaces.
//!
//! Behavior trees never path-find themselves: they ask the world to move an
//! agent and poll whether it is close enough. This crate names those two
//! questions and ships [`LinearMover`], a straight-line reference backend for
//! tests and demos.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod math;
pub mod mover;
pub mod world;

pub use math::Vec3;
pub use mover::{Bounds, LinearMover};
pub use world::{NavWorldMut, NavWorldView};
