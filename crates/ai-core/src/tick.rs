#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-update input handed to every behavior in a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }

    /// The context for the following update, reusing the same step length.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            dt_seconds: self.dt_seconds,
        }
    }

    /// Elapsed time of this step, never negative.
    pub fn dt(&self) -> f32 {
        self.dt_seconds.max(0.0)
    }
}
