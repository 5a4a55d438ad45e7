mod support;

use ai_bt::{
    ArriveAt, Behavior, BehaviorTree, EndReason, RuntimeConfig, Status, Task, TargetAction,
    Targeted, TaskResult,
};
use ai_core::{Blackboards, Reference, TickContext};
use ai_nav::Vec3;
use ai_tree::Tree;
use support::{Harness, TestWorld, AGENT};

const GOAL: Reference<Vec3> = Reference::local("goal");

fn single(task: impl Task<TestWorld>) -> Harness {
    let mut tree = Tree::new(Behavior::sequence("root"));
    let root = tree.root();
    tree.add_child(root, Behavior::task("leaf", task)).unwrap();
    Harness::new(BehaviorTree::from_tree(tree, RuntimeConfig::default()).unwrap())
}

#[test]
fn approaches_then_succeeds_with_a_single_request() {
    let mut h = single(ArriveAt::task(GOAL, 0.5));
    h.local.set("goal", Vec3::new(3.0, 0.0, 0.0));

    let mut statuses = Vec::new();
    for _ in 0..4 {
        statuses.push(h.tick());
        h.world.mover.step(1.0);
    }

    assert_eq!(
        statuses,
        vec![
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Success
        ]
    );
    assert_eq!(h.world.requests, vec![Vec3::new(3.0, 0.0, 0.0)]);
    assert_eq!(h.world.cancelled_moves, 0);
}

#[test]
fn target_in_range_skips_navigation() {
    let mut h = single(ArriveAt::task(GOAL, 0.5));
    h.local.set("goal", Vec3::new(0.2, 0.0, 0.0));

    assert_eq!(h.tick(), Status::Success);
    assert!(h.world.requests.is_empty());
}

#[test]
fn rejected_move_fails_on_the_same_tick() {
    let mut h = single(ArriveAt::task(GOAL, 0.5));
    h.local.set("goal", Vec3::new(9.0, 0.0, 0.0));
    h.world.reject_moves = true;

    assert_eq!(h.tick(), Status::Failure);
    assert_eq!(h.world.requests.len(), 1);
    assert_eq!(h.world.cancelled_moves, 0);
}

#[test]
fn target_moved_away_mid_approach_is_requested_again() {
    let mut h = single(ArriveAt::task(GOAL, 0.5));
    h.local.set("goal", Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(h.tick(), Status::Running);
    h.world.mover.step(1.0);

    h.local.set("goal", Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(h.tick(), Status::Running);
    assert_eq!(
        h.world.requests,
        vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0)]
    );

    let mut statuses = Vec::new();
    for _ in 0..3 {
        h.world.mover.step(1.0);
        statuses.push(h.tick());
    }
    assert_eq!(
        statuses,
        vec![Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(h.world.mover.position(AGENT), Some(Vec3::new(-2.0, 0.0, 0.0)));
    assert_eq!(h.world.requests.len(), 2);
    assert_eq!(h.world.cancelled_moves, 0);
}

#[test]
fn missing_target_fails_without_moving() {
    let mut h = single(ArriveAt::task(GOAL, 0.5));
    assert_eq!(h.tick(), Status::Failure);
    assert!(h.world.requests.is_empty());
}

/// Logs the target it sees when ending.
struct Inspect;

impl TargetAction<TestWorld> for Inspect {
    type Target = Vec3;

    fn range(&self) -> f32 {
        1.0
    }

    fn locate(&self, target: &Vec3, _world: &TestWorld) -> Option<Vec3> {
        Some(*target)
    }

    fn on_target_update(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
        target: &Vec3,
    ) -> TaskResult<Status> {
        world.log.push(format!("inspect {}", target.x));
        Ok(Status::Success)
    }

    fn on_target_end(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
        target: Option<&Vec3>,
        reason: EndReason,
    ) {
        world
            .log
            .push(format!("end {:?} {reason}", target.map(|t| t.x)));
    }
}

#[test]
fn end_sees_the_current_target_and_cancels_the_move() {
    let mut h = single(Targeted::new(Inspect, GOAL));
    h.local.set("goal", Vec3::new(5.0, 0.0, 0.0));

    assert_eq!(h.tick(), Status::Running);
    assert!(h.world.mover.is_moving(AGENT));

    // A small shift stays within range of the requested point.
    h.local.set("goal", Vec3::new(5.5, 0.0, 0.0));
    assert_eq!(h.tick(), Status::Running);
    assert_eq!(h.world.requests.len(), 1);

    h.cancel();
    assert_eq!(h.world.take_log(), vec!["end Some(5.5) cancelled"]);
    assert_eq!(h.world.cancelled_moves, 1);
    assert!(!h.world.mover.is_moving(AGENT));
}

#[test]
fn target_reads_are_live_every_tick() {
    let mut h = single(Targeted::new(Inspect, GOAL));
    h.local.set("goal", Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(h.tick(), Status::Running);

    // The target comes to the agent.
    h.local.set("goal", Vec3::new(0.5, 0.0, 0.0));
    assert_eq!(h.tick(), Status::Success);
    assert_eq!(
        h.world.take_log(),
        vec!["inspect 0.5", "end Some(0.5) success"]
    );
    assert_eq!(h.world.cancelled_moves, 0);
}
