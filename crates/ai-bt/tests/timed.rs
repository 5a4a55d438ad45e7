mod support;

use ai_bt::{
    Behavior, BehaviorTree, RuntimeConfig, Status, TaskResult, Timed, TimedAction, Wait,
};
use ai_core::{Blackboards, TickContext};
use ai_tree::Tree;
use support::{Harness, TestWorld};

#[test]
fn sequence_of_timed_waits_restarts_forever() {
    let mut tree = Tree::new(Behavior::sequence("root"));
    let root = tree.root();
    tree.add_child(root, Behavior::task("long", Wait::seconds(1.0))).unwrap();
    tree.add_child(root, Behavior::task("short", Wait::seconds(0.5))).unwrap();
    let mut h = Harness::with_dt(
        BehaviorTree::from_tree(tree, RuntimeConfig::default()).unwrap(),
        0.5,
    );

    assert_eq!(
        h.ticks(3),
        vec![Status::Running, Status::Running, Status::Success]
    );
    assert_eq!(h.tree.restarts(), 0);

    assert_eq!(h.tick(), Status::Running);
    assert_eq!(h.tree.restarts(), 1);
    assert_eq!(h.tree.active_leaf(), h.tree.find("long"));

    assert_eq!(h.ticks(2), vec![Status::Running, Status::Success]);
}

/// Records the progress it is shown.
#[derive(Default)]
struct Charge {
    fail_at: Option<f32>,
}

impl TimedAction<TestWorld> for Charge {
    fn on_timed_update(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut TestWorld,
        _blackboard: &mut Blackboards<'_>,
        progress: f32,
    ) -> TaskResult<Status> {
        world.log.push(format!("progress {progress}"));
        if self.fail_at.is_some_and(|p| progress >= p) {
            return Ok(Status::Failure);
        }
        Ok(Status::Running)
    }
}

fn charge(fail_at: Option<f32>) -> Harness {
    let mut tree = Tree::new(Behavior::sequence("root"));
    let root = tree.root();
    tree.add_child(
        root,
        Behavior::task("charge", Timed::new(Charge { fail_at }, 1.0)),
    )
    .unwrap();
    Harness::with_dt(
        BehaviorTree::from_tree(tree, RuntimeConfig::default()).unwrap(),
        0.25,
    )
}

#[test]
fn expiry_wins_over_running() {
    let mut h = charge(None);
    assert_eq!(
        h.ticks(4),
        vec![
            Status::Running,
            Status::Running,
            Status::Running,
            Status::Success
        ]
    );
    assert_eq!(
        h.world.take_log(),
        vec!["progress 0.25", "progress 0.5", "progress 0.75"]
    );
}

#[test]
fn action_can_end_early() {
    let mut h = charge(Some(0.5));
    assert_eq!(h.ticks(2), vec![Status::Running, Status::Failure]);
}

#[test]
fn timer_restarts_with_the_task() {
    let mut h = charge(None);
    h.ticks(4);
    h.world.log.clear();
    h.tick();
    assert_eq!(h.world.take_log(), vec!["progress 0.25"]);
}

#[test]
fn progress_is_clamped() {
    let timed = Timed::new(Wait, 0.0);
    assert_eq!(timed.progress(), 1.0);
    assert!(timed.is_expired());

    let timed = Wait::seconds(2.0);
    assert_eq!(timed.progress(), 0.0);
    assert_eq!(timed.duration(), 2.0);
}
