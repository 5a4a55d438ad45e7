#![allow(dead_code)]

use ai_bt::{BehaviorTree, EndReason, Status, Task, TaskResult};
use ai_core::{Blackboard, Blackboards, TickContext, WorldMut, WorldView};
use ai_nav::{LinearMover, NavWorldMut, NavWorldView, Vec3};

pub const AGENT: u64 = 1;

/// Records everything tasks do so tests can assert on the order of calls.
#[derive(Debug)]
pub struct TestWorld {
    pub log: Vec<String>,
    pub mover: LinearMover<u64>,
    pub requests: Vec<Vec3>,
    pub cancelled_moves: u32,
    pub reject_moves: bool,
}

impl Default for TestWorld {
    fn default() -> Self {
        let mut mover = LinearMover::new(1.0);
        mover.place(AGENT, Vec3::ZERO);
        Self {
            log: Vec::new(),
            mover,
            requests: Vec::new(),
            cancelled_moves: 0,
            reject_moves: false,
        }
    }
}

impl TestWorld {
    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }
}

impl WorldView for TestWorld {
    type Agent = u64;
}

impl WorldMut for TestWorld {}

impl NavWorldView for TestWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.mover.position(agent)
    }
}

impl NavWorldMut for TestWorld {
    fn request_move_to(&mut self, agent: u64, target: Vec3) -> bool {
        self.requests.push(target);
        !self.reject_moves && self.mover.request(agent, target)
    }

    fn cancel_move(&mut self, agent: u64) {
        self.cancelled_moves += 1;
        self.mover.cancel(agent);
    }
}

/// Returns a fixed sequence of statuses, repeating the last one.
pub struct Scripted {
    name: &'static str,
    script: Vec<Status>,
    cursor: usize,
}

impl Scripted {
    pub fn new(name: &'static str, script: impl Into<Vec<Status>>) -> Self {
        Self {
            name,
            script: script.into(),
            cursor: 0,
        }
    }

    pub fn succeed(name: &'static str) -> Self {
        Self::new(name, [Status::Success])
    }

    pub fn fail(name: &'static str) -> Self {
        Self::new(name, [Status::Failure])
    }

    /// Running `n` times, then success.
    pub fn running_then_succeed(name: &'static str, n: usize) -> Self {
        let mut script = vec![Status::Running; n];
        script.push(Status::Success);
        Self::new(name, script)
    }
}

impl Task<TestWorld> for Scripted {
    fn on_start(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<()> {
        self.cursor = 0;
        world.log.push(format!("start {}", self.name));
        Ok(())
    }

    fn on_update(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        world.log.push(format!("update {}", self.name));
        let status = self
            .script
            .get(self.cursor)
            .or(self.script.last())
            .copied()
            .unwrap_or(Status::Success);
        self.cursor += 1;
        Ok(status)
    }

    fn on_end(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
        reason: EndReason,
    ) {
        world.log.push(format!("end {} {}", self.name, reason));
    }
}

/// Owns everything needed to tick a tree for [`AGENT`].
pub struct Harness {
    pub tree: BehaviorTree<TestWorld>,
    pub world: TestWorld,
    pub local: Blackboard,
    pub global: Blackboard,
    pub ctx: TickContext,
}

impl Harness {
    pub fn new(tree: BehaviorTree<TestWorld>) -> Self {
        Self::with_dt(tree, 0.1)
    }

    pub fn with_dt(tree: BehaviorTree<TestWorld>, dt: f32) -> Self {
        Self {
            tree,
            world: TestWorld::default(),
            local: Blackboard::new(),
            global: Blackboard::global(),
            ctx: TickContext::new(0, dt),
        }
    }

    pub fn tick(&mut self) -> Status {
        self.ctx = self.ctx.next();
        self.tree.tick(
            &self.ctx,
            AGENT,
            &mut self.world,
            &mut self.local,
            &mut self.global,
        )
    }

    pub fn ticks(&mut self, n: usize) -> Vec<Status> {
        (0..n).map(|_| self.tick()).collect()
    }

    pub fn cancel(&mut self) {
        self.tree.cancel(
            &self.ctx,
            AGENT,
            &mut self.world,
            &mut self.local,
            &mut self.global,
        );
    }
}

pub fn log(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}
