use ai_core::{WorldMut, WorldView};
use ai_nav::{LinearMover, NavWorldMut, NavWorldView, Vec3};

/// The world a simulated agent lives in: just positions and movement.
#[derive(Debug, Clone)]
pub struct SimWorld {
    pub mover: LinearMover<u32>,
    pub rejected_moves: u32,
}

impl SimWorld {
    pub fn new(mover: LinearMover<u32>) -> Self {
        Self {
            mover,
            rejected_moves: 0,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.mover.step(dt);
    }
}

impl WorldView for SimWorld {
    type Agent = u32;
}

impl WorldMut for SimWorld {}

impl NavWorldView for SimWorld {
    fn position(&self, agent: u32) -> Option<Vec3> {
        self.mover.position(agent)
    }
}

impl NavWorldMut for SimWorld {
    fn request_move_to(&mut self, agent: u32, target: Vec3) -> bool {
        let accepted = self.mover.request(agent, target);
        if !accepted {
            self.rejected_moves += 1;
        }
        accepted
    }

    fn cancel_move(&mut self, agent: u32) {
        self.mover.cancel(agent);
    }
}
