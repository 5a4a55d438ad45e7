use ai_bt::{load_tree, BehaviorTree, Status, TRACE_CANCEL, TRACE_END, TRACE_START};
use ai_core::{Blackboard, TickContext};
use ai_nav::{LinearMover, Vec3};
use ai_tools::SharedTraceLog;
use anyhow::{Context, Result};

use crate::tasks::{WAYPOINTS, WAYPOINT_INDEX};
use crate::{DemoTaskFactory, Scenario, SimWorld};

/// What happened over a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub ticks: u64,
    pub successes: u64,
    pub failures: u64,
    pub restarts: u64,
    pub rejected_moves: u32,
    pub position: Option<Vec3>,
    pub behaviors_started: usize,
    pub behaviors_ended: usize,
}

/// One agent, its tree and the world it moves in.
pub struct Simulation {
    agent: u32,
    tree: BehaviorTree<SimWorld>,
    world: SimWorld,
    local: Blackboard,
    global: Blackboard,
    ctx: TickContext,
    trace: SharedTraceLog,
    successes: u64,
    failures: u64,
}

impl Simulation {
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let trace = SharedTraceLog::new();
        let tree = load_tree::<SimWorld, _>(
            scenario.tree.clone(),
            &DemoTaskFactory,
            scenario.runtime.clone(),
        )
        .with_context(|| format!("Failed to build tree {:?}", scenario.runtime.name))?
        .with_trace_sink(trace.clone());

        let agent = scenario.agent.id;
        let mut mover = LinearMover::new(scenario.agent.speed);
        if let Some(bounds) = scenario.bounds {
            mover = mover.with_bounds(bounds);
        }
        mover.place(agent, Vec3::from(scenario.agent.start));

        let mut global = Blackboard::global();
        global.set(
            WAYPOINTS.symbol(),
            scenario
                .waypoints
                .iter()
                .copied()
                .map(Vec3::from)
                .collect::<Vec<_>>(),
        );
        let mut local = Blackboard::new();
        local.set(WAYPOINT_INDEX.symbol(), 0usize);

        tracing::info!(
            tree = %scenario.runtime.name,
            nodes = tree.len(),
            waypoints = scenario.waypoints.len(),
            "simulation ready"
        );

        Ok(Self {
            agent,
            tree,
            world: SimWorld::new(mover),
            local,
            global,
            ctx: TickContext::new(0, scenario.dt),
            trace,
            successes: 0,
            failures: 0,
        })
    }

    /// Tick the tree, then advance movement by one step.
    pub fn step(&mut self) -> Status {
        self.ctx = self.ctx.next();
        let status = self.tree.tick(
            &self.ctx,
            self.agent,
            &mut self.world,
            &mut self.local,
            &mut self.global,
        );
        match status {
            Status::Success => self.successes += 1,
            Status::Failure => self.failures += 1,
            Status::Running => {}
        }
        if !status.is_running() {
            tracing::info!(tick = self.ctx.tick, %status, position = ?self.position(), "tree finished");
        }
        self.world.step(self.ctx.dt());
        status
    }

    pub fn run(&mut self, ticks: u64) -> Summary {
        for _ in 0..ticks {
            self.step();
        }
        self.summary()
    }

    /// Cancel whatever is running, ending every active task.
    pub fn stop(&mut self) {
        self.tree.cancel(
            &self.ctx,
            self.agent,
            &mut self.world,
            &mut self.local,
            &mut self.global,
        );
    }

    pub fn position(&self) -> Option<Vec3> {
        self.world.mover.position(self.agent)
    }

    pub fn tree(&self) -> &BehaviorTree<SimWorld> {
        &self.tree
    }

    pub fn trace(&self) -> &SharedTraceLog {
        &self.trace
    }

    pub fn summary(&self) -> Summary {
        Summary {
            ticks: self.ctx.tick,
            successes: self.successes,
            failures: self.failures,
            restarts: self.tree.restarts(),
            rejected_moves: self.world.rejected_moves,
            position: self.position(),
            behaviors_started: self.trace.count(TRACE_START),
            behaviors_ended: self.trace.count(TRACE_END) + self.trace.count(TRACE_CANCEL),
        }
    }
}
