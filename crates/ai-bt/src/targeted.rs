use ai_core::{Blackboards, Reference, TickContext};
use ai_nav::{NavWorldMut, Vec3};

use crate::{EndReason, Status, Task, TaskError, TaskResult};

/// An action that has to be performed within range of a target.
///
/// Wrap it in [`Targeted`] to get a [`Task`] that first walks the agent
/// there through the world's navigation.
pub trait TargetAction<W>: 'static
where
    W: NavWorldMut + 'static,
{
    type Target: Clone + 'static;

    /// How close the agent must be before `on_target_update` is called.
    fn range(&self) -> f32;

    /// Where `target` currently is, if anywhere.
    fn locate(&self, target: &Self::Target, world: &W) -> Option<Vec3>;

    fn on_target_start(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        Ok(())
    }

    /// Called on ticks where the agent is in range.
    fn on_target_update(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
        target: &Self::Target,
    ) -> TaskResult<Status>;

    /// `target` is looked up again at end time; `None` if it no longer resolves.
    fn on_target_end(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
        _target: Option<&Self::Target>,
        _reason: EndReason,
    ) {
    }
}

/// Approach-then-act wrapper around a [`TargetAction`].
///
/// The target is read through a blackboard [`Reference`] on every tick, so
/// retargeting is a blackboard write. While approaching, no new move is
/// requested unless the target has drifted out of range of the point last
/// requested. A rejected request fails the task on the same tick.
#[derive(Debug, Clone)]
pub struct Targeted<A, T: 'static> {
    action: A,
    target: Reference<T>,
    requested: Option<Vec3>,
}

impl<A, T: 'static> Targeted<A, T> {
    pub fn new(action: A, target: Reference<T>) -> Self {
        Self {
            action,
            target,
            requested: None,
        }
    }

    pub fn target(&self) -> &Reference<T> {
        &self.target
    }

    pub fn is_approaching(&self) -> bool {
        self.requested.is_some()
    }

    /// Destination of the move in flight, if any.
    pub fn requested(&self) -> Option<Vec3> {
        self.requested
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

impl<W, A, T> Task<W> for Targeted<A, T>
where
    W: NavWorldMut + 'static,
    A: TargetAction<W, Target = T>,
    T: Clone + 'static,
{
    fn on_start(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        self.requested = None;
        self.action.on_target_start(ctx, agent, world, blackboard)
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        let target = self.target.get_cloned(blackboard)?;
        let position = self
            .action
            .locate(&target, world)
            .ok_or(TaskError::NoTargetPosition)?;

        let range = self.action.range();
        if !world.is_within_range(agent, position, range) {
            if let Some(requested) = self.requested {
                if requested.distance(position) <= range {
                    return Ok(Status::Running);
                }
                tracing::debug!(
                    ?agent,
                    symbol = self.target.symbol(),
                    "target moved, requesting a new move"
                );
            }
            // The previous move, if any, stays recorded so ending cancels it.
            if !world.request_move_to(agent, position) {
                tracing::debug!(
                    ?agent,
                    symbol = self.target.symbol(),
                    "move request rejected"
                );
                return Ok(Status::Failure);
            }
            self.requested = Some(position);
            return Ok(Status::Running);
        }

        self.requested = None;
        self.action
            .on_target_update(ctx, agent, world, blackboard, &target)
    }

    fn on_end(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
        reason: EndReason,
    ) {
        if self.requested.take().is_some() {
            world.cancel_move(agent);
        }
        let target = self.target.get_cloned(blackboard).ok();
        self.action
            .on_target_end(ctx, agent, world, blackboard, target.as_ref(), reason);
    }
}

/// Succeeds as soon as the agent is within `range` of a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArriveAt {
    pub range: f32,
}

impl ArriveAt {
    pub fn new(range: f32) -> Self {
        Self { range }
    }

    pub fn task(target: Reference<Vec3>, range: f32) -> Targeted<ArriveAt, Vec3> {
        Targeted::new(Self::new(range), target)
    }
}

impl<W> TargetAction<W> for ArriveAt
where
    W: NavWorldMut + 'static,
{
    type Target = Vec3;

    fn range(&self) -> f32 {
        self.range
    }

    fn locate(&self, target: &Vec3, _world: &W) -> Option<Vec3> {
        target.is_finite().then_some(*target)
    }

    fn on_target_update(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
        _target: &Vec3,
    ) -> TaskResult<Status> {
        Ok(Status::Success)
    }
}
