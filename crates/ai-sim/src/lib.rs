//! Headless behavior tree simulation.
//!
//! A [`Scenario`] describes one agent, its patrol waypoints and a tree asset;
//! a [`Simulation`] ticks that tree against a [`SimWorld`] and moves the
//! agent with a straight-line mover.

#![forbid(unsafe_code)]

pub mod scenario;
pub mod simulation;
pub mod tasks;
pub mod world;

pub use scenario::{AgentConfig, Scenario};
pub use simulation::{Simulation, Summary};
pub use tasks::DemoTaskFactory;
pub use world::SimWorld;
