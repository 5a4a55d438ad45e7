use ai_core::{WorldMut, WorldView};
use ai_nav::{Bounds, LinearMover, NavWorldMut, NavWorldView, Vec3};

#[test]
fn mover_walks_at_constant_speed_and_stops_on_goal() {
    let mut mover = LinearMover::new(2.0);
    mover.place(1u32, Vec3::ZERO);
    assert!(mover.request(1, Vec3::new(4.0, 0.0, 0.0)));

    mover.step(1.0);
    assert_eq!(mover.position(1), Some(Vec3::new(2.0, 0.0, 0.0)));
    assert!(mover.is_moving(1));

    mover.step(1.0);
    assert_eq!(mover.position(1), Some(Vec3::new(4.0, 0.0, 0.0)));
    assert!(!mover.is_moving(1));
}

#[test]
fn mover_rejects_unknown_agents_and_bad_targets() {
    let bounds = Bounds::new(Vec3::new(-5.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0));
    let mut mover = LinearMover::new(1.0).with_bounds(bounds);
    assert!(!mover.request(7u32, Vec3::ZERO));

    mover.place(7, Vec3::ZERO);
    assert!(!mover.request(7, Vec3::new(10.0, 0.0, 0.0)));
    assert!(!mover.request(7, Vec3::new(f32::NAN, 0.0, 0.0)));
    assert!(mover.request(7, Vec3::new(4.0, 0.0, 0.0)));
}

#[test]
fn cancel_and_place_drop_the_goal() {
    let mut mover = LinearMover::new(1.0);
    mover.place(1u64, Vec3::ZERO);
    mover.request(1, Vec3::new(0.0, 0.0, 9.0));
    assert!(mover.cancel(1));
    assert!(!mover.cancel(1));

    mover.step(1.0);
    assert_eq!(mover.position(1), Some(Vec3::ZERO));

    mover.request(1, Vec3::new(0.0, 0.0, 9.0));
    mover.place(1, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(mover.goal(1), None);
}

struct World {
    mover: LinearMover<u32>,
}

impl WorldView for World {
    type Agent = u32;
}

impl WorldMut for World {}

impl NavWorldView for World {
    fn position(&self, agent: u32) -> Option<Vec3> {
        self.mover.position(agent)
    }
}

impl NavWorldMut for World {
    fn request_move_to(&mut self, agent: u32, target: Vec3) -> bool {
        self.mover.request(agent, target)
    }
}

#[test]
fn range_check_uses_position_by_default() {
    let mut world = World {
        mover: LinearMover::new(1.0),
    };
    world.mover.place(0, Vec3::ZERO);

    assert!(world.is_within_range(0, Vec3::new(1.0, 0.0, 0.0), 1.0));
    assert!(!world.is_within_range(0, Vec3::new(1.5, 0.0, 0.0), 1.0));
    assert!(!world.is_within_range(9, Vec3::ZERO, 100.0));

    assert!(world.request_move_to(0, Vec3::new(2.0, 0.0, 0.0)));
    world.cancel_move(0);
    assert!(world.mover.is_moving(0));
}
