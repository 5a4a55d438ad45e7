use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// Axis-aligned box that move targets must lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

/// Straight-line, constant-speed movement for a set of agents.
///
/// Worlds embed one of these and forward [`NavWorldMut`](crate::NavWorldMut)
/// calls to it, then call [`step`](Self::step) once per simulation tick.
#[derive(Debug, Clone)]
pub struct LinearMover<A: Ord> {
    speed: f32,
    bounds: Option<Bounds>,
    positions: BTreeMap<A, Vec3>,
    goals: BTreeMap<A, Vec3>,
}

impl<A: Ord + Copy + core::fmt::Debug> LinearMover<A> {
    pub fn new(speed: f32) -> Self {
        Self {
            speed: speed.max(0.0),
            bounds: None,
            positions: BTreeMap::new(),
            goals: BTreeMap::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Teleport `agent`, dropping any goal it had.
    pub fn place(&mut self, agent: A, position: Vec3) {
        self.positions.insert(agent, position);
        self.goals.remove(&agent);
    }

    pub fn position(&self, agent: A) -> Option<Vec3> {
        self.positions.get(&agent).copied()
    }

    pub fn goal(&self, agent: A) -> Option<Vec3> {
        self.goals.get(&agent).copied()
    }

    pub fn is_moving(&self, agent: A) -> bool {
        self.goals.contains_key(&agent)
    }

    /// Accept a new goal, replacing the previous one.
    ///
    /// Rejected for unknown agents, non-finite targets and targets outside
    /// the bounds.
    pub fn request(&mut self, agent: A, target: Vec3) -> bool {
        if !self.positions.contains_key(&agent) {
            tracing::debug!(?agent, "move rejected: unknown agent");
            return false;
        }
        if !target.is_finite() || self.bounds.is_some_and(|b| !b.contains(target)) {
            tracing::debug!(?agent, ?target, "move rejected: target out of bounds");
            return false;
        }
        self.goals.insert(agent, target);
        true
    }

    pub fn cancel(&mut self, agent: A) -> bool {
        self.goals.remove(&agent).is_some()
    }

    /// Advance every moving agent by `speed * dt`; goals reached are cleared.
    pub fn step(&mut self, dt: f32) {
        let budget = self.speed * dt.max(0.0);
        let positions = &mut self.positions;
        self.goals.retain(|agent, goal| {
            let Some(pos) = positions.get_mut(agent) else {
                return false;
            };
            *pos = pos.move_towards(*goal, budget);
            *pos != *goal
        });
    }
}
