use ai_core::{Blackboards, TickContext, WorldMut};

use crate::{EndReason, Status, Task, TaskResult};

/// An action that runs for a fixed amount of simulated time.
///
/// Wrap it in [`Timed`] to get a [`Task`].
pub trait TimedAction<W>: 'static
where
    W: WorldMut + 'static,
{
    fn on_timed_start(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        Ok(())
    }

    /// Called while the timer has not expired. `progress` is in `[0, 1)`.
    fn on_timed_update(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
        _progress: f32,
    ) -> TaskResult<Status> {
        Ok(Status::Running)
    }

    fn on_timed_end(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboards<'_>,
        _reason: EndReason,
    ) {
    }
}

/// Runs `action` until `duration` seconds have elapsed, then succeeds.
///
/// Expiry wins over whatever the action would have returned on that tick;
/// the action can still end the task early with `Success` or `Failure`.
#[derive(Debug, Clone)]
pub struct Timed<A> {
    action: A,
    duration: f32,
    elapsed: f32,
}

impl<A> Timed<A> {
    pub fn new(action: A, duration: f32) -> Self {
        Self {
            action,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn action_mut(&mut self) -> &mut A {
        &mut self.action
    }
}

impl<W, A> Task<W> for Timed<A>
where
    W: WorldMut + 'static,
    A: TimedAction<W>,
{
    fn on_start(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        self.elapsed = 0.0;
        self.action.on_timed_start(ctx, agent, world, blackboard)
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        self.elapsed += ctx.dt();
        if self.is_expired() {
            return Ok(Status::Success);
        }
        let progress = self.progress();
        self.action
            .on_timed_update(ctx, agent, world, blackboard, progress)
    }

    fn on_end(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboards<'_>,
        reason: EndReason,
    ) {
        self.action
            .on_timed_end(ctx, agent, world, blackboard, reason);
    }
}

/// Does nothing for a while.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wait;

impl Wait {
    pub fn seconds(duration: f32) -> Timed<Wait> {
        Timed::new(Wait, duration)
    }
}

impl<W> TimedAction<W> for Wait where W: WorldMut + 'static {}
