use ai_core::{WorldMut, WorldView};

use crate::Vec3;

pub trait NavWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    /// Whether `agent` is within `range` of `target`.
    ///
    /// Agents without a known position are never in range.
    fn is_within_range(&self, agent: Self::Agent, target: Vec3, range: f32) -> bool {
        self.position(agent)
            .is_some_and(|pos| pos.distance(target) <= range)
    }
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    /// Ask the navigation backend to move `agent` towards `target`.
    ///
    /// Returns `false` when the request is rejected outright (unreachable or
    /// invalid target); an accepted request is progressed by the backend.
    fn request_move_to(&mut self, agent: Self::Agent, target: Vec3) -> bool;

    /// Abandon any in-flight move for `agent`.
    fn cancel_move(&mut self, _agent: Self::Agent) {}
}
