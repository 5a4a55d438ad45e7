use core::fmt;

use ai_core::{Blackboards, TickContext, WorldMut};

use crate::{Outcome, Status, TaskResult};

/// Why [`Task::on_end`] is being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Completed(Outcome),
    /// The tree was cancelled while the task was still running.
    Cancelled,
}

impl EndReason {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            EndReason::Completed(outcome) => Some(outcome),
            EndReason::Cancelled => None,
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Completed(outcome) => outcome.fmt(f),
            EndReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Leaf behavior.
///
/// Every `on_start` is matched by exactly one `on_end`, also when `on_start`
/// errors or the tree is cancelled. `on_update` runs at most once per tick
/// and never on the tick a task was started by a sibling finishing.
pub trait Task<W>: 'static
where
    W: WorldMut + 'static,
{
    fn on_start(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        Ok(())
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status>;

    fn on_end(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
        _reason: EndReason,
    ) {
    }
}
