use ai_bt::{
    ArriveAt, BuildError, Params, Status, Task, TaskError, TaskFactory, TaskResult, Wait,
};
use ai_core::{Blackboards, Reference, Scope, TickContext};
use ai_nav::Vec3;

use crate::SimWorld;

/// Global list of patrol points.
pub const WAYPOINTS: Reference<Vec<Vec3>> = Reference::global("waypoints");
/// Local index of the next patrol point.
pub const WAYPOINT_INDEX: Reference<usize> = Reference::local("waypoint_index");

const DEFAULT_TARGET: &str = "waypoint";

/// Builds the demo task set:
///
/// | task            | params                              |
/// |-----------------|-------------------------------------|
/// | `wait`          | `seconds`                           |
/// | `move_to`       | `target` (symbol), `range`          |
/// | `next_waypoint` | `target` (symbol)                   |
/// | `set_target`    | `target` (symbol), `point` (vector) |
/// | `succeed`       |                                     |
/// | `fail`          |                                     |
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTaskFactory;

impl TaskFactory<SimWorld> for DemoTaskFactory {
    fn create(&self, task: &str, params: &Params) -> Result<Box<dyn Task<SimWorld>>, BuildError> {
        let target = || -> Result<String, BuildError> {
            match params.get("target") {
                Some(_) => params.text("target").map(str::to_string),
                None => Ok(DEFAULT_TARGET.to_string()),
            }
        };

        let task: Box<dyn Task<SimWorld>> = match task {
            "wait" => Box::new(Wait::seconds(params.f32("seconds")?)),
            "move_to" => Box::new(ArriveAt::task(
                Reference::new(target()?, Scope::Local),
                params.f32_or("range", 0.1)?,
            )),
            "next_waypoint" => Box::new(NextWaypoint {
                target: Reference::new(target()?, Scope::Local),
            }),
            "set_target" => Box::new(SetTarget {
                target: Reference::new(target()?, Scope::Local),
                point: params.vec3("point")?,
            }),
            "succeed" => Box::new(Constant(Status::Success)),
            "fail" => Box::new(Constant(Status::Failure)),
            other => return Err(BuildError::UnknownTask(other.to_string())),
        };
        Ok(task)
    }
}

/// Writes the next patrol point into `target` and advances the index.
#[derive(Debug, Clone)]
pub struct NextWaypoint {
    target: Reference<Vec3>,
}

impl Task<SimWorld> for NextWaypoint {
    fn on_update(
        &mut self,
        _ctx: &TickContext,
        agent: u32,
        _world: &mut SimWorld,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        let index = WAYPOINT_INDEX.get_cloned(blackboard)?;
        let waypoints = WAYPOINTS.get(blackboard)?;
        let Some(&point) = waypoints.get(index % waypoints.len().max(1)) else {
            return Err(TaskError::Failed("no waypoints to patrol".to_string()));
        };
        let next = (index + 1) % waypoints.len();

        self.target.set(blackboard, point);
        WAYPOINT_INDEX.set(blackboard, next);
        tracing::debug!(agent, index, ?point, "next waypoint");
        Ok(Status::Success)
    }
}

/// Writes a fixed point into `target`.
#[derive(Debug, Clone)]
pub struct SetTarget {
    target: Reference<Vec3>,
    point: Vec3,
}

impl Task<SimWorld> for SetTarget {
    fn on_update(
        &mut self,
        _ctx: &TickContext,
        _agent: u32,
        _world: &mut SimWorld,
        blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        self.target.set(blackboard, self.point);
        Ok(Status::Success)
    }
}

/// Ends with a fixed status on its first update.
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub Status);

impl Task<SimWorld> for Constant {
    fn on_update(
        &mut self,
        _ctx: &TickContext,
        _agent: u32,
        _world: &mut SimWorld,
        _blackboard: &mut Blackboards<'_>,
    ) -> TaskResult<Status> {
        Ok(self.0)
    }
}
