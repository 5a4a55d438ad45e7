mod support;

use ai_bt::{
    load_tree, ArriveAt, Behavior, BehaviorTree, BuildError, NodeSpec, Params, RuntimeConfig,
    Status, Task, TaskFactory, Wait,
};
use ai_core::{Reference, Scope};
use ai_tree::{FlatNode, Tree, TreeError};
use support::{Harness, Scripted, TestWorld};

struct Factory;

impl TaskFactory<TestWorld> for Factory {
    fn create(&self, task: &str, params: &Params) -> Result<Box<dyn Task<TestWorld>>, BuildError> {
        let task: Box<dyn Task<TestWorld>> = match task {
            "succeed" => Box::new(Scripted::succeed("succeed")),
            "fail" => Box::new(Scripted::fail("fail")),
            "wait" => Box::new(Wait::seconds(params.f32("seconds")?)),
            "arrive" => Box::new(ArriveAt::task(
                Reference::new(params.text("target")?.to_string(), Scope::Local),
                params.f32_or("range", 0.5)?,
            )),
            other => return Err(BuildError::UnknownTask(other.to_string())),
        };
        Ok(task)
    }
}

fn row(depth: i32, spec: NodeSpec) -> FlatNode<NodeSpec> {
    FlatNode::new(depth, spec)
}

fn load(list: Vec<FlatNode<NodeSpec>>) -> Result<BehaviorTree<TestWorld>, BuildError> {
    load_tree(list, &Factory, RuntimeConfig::default())
}

#[test]
fn loads_and_runs_an_asset() {
    let tree = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::task("succeed", Params::new())),
        row(0, NodeSpec::task("wait", Params::new().with("seconds", 0.2f32))),
    ])
    .unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.find("wait").map(|id| id.0), Some(2));
    let outline: Vec<(i32, String)> = tree
        .outline()
        .into_iter()
        .map(|r| (r.depth, r.data))
        .collect();
    assert_eq!(
        outline,
        vec![
            (-1, "root (sequence)".to_string()),
            (0, "succeed (task)".to_string()),
            (0, "wait (task)".to_string()),
        ]
    );

    let mut h = Harness::with_dt(tree, 0.25);
    assert_eq!(h.ticks(2), vec![Status::Running, Status::Success]);
}

#[test]
fn bad_depths_are_normalized_once() {
    let list = || {
        vec![
            row(0, NodeSpec::sequence("root")),
            row(2, NodeSpec::task("succeed", Params::new())),
        ]
    };

    let tree = load(list()).unwrap();
    assert_eq!(tree.children(tree.root()).len(), 1);

    let strict = RuntimeConfig {
        repair_on_load: false,
        ..RuntimeConfig::default()
    };
    let err = load_tree::<TestWorld, _>(list(), &Factory, strict).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Tree(TreeError::InvalidTreeDepth { index: 0, .. })
    ));
}

#[test]
fn empty_asset_is_rejected() {
    assert!(matches!(
        load(Vec::new()),
        Err(BuildError::Tree(TreeError::InvalidTreeDepth { .. }))
    ));
}

#[test]
fn factory_errors_surface() {
    let err = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::task("dance", Params::new())),
    ])
    .unwrap_err();
    assert_eq!(err, BuildError::UnknownTask("dance".into()));

    let err = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::task("wait", Params::new())),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        BuildError::MissingParam {
            param: "seconds".into()
        }
    );

    let err = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::task("wait", Params::new().with("seconds", "soon"))),
    ])
    .unwrap_err();
    assert!(matches!(err, BuildError::InvalidParam { .. }));
}

#[test]
fn structural_rules_are_enforced() {
    let err = load(vec![row(-1, NodeSpec::task("succeed", Params::new()))]).unwrap_err();
    assert_eq!(
        err,
        BuildError::RootNotComposite {
            name: "succeed".into()
        }
    );

    let err = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::Inverter { name: None }),
        row(1, NodeSpec::task("succeed", Params::new())),
        row(1, NodeSpec::task("fail", Params::new())),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        BuildError::DecoratorArity {
            name: "inverter".into(),
            children: 2
        }
    );

    let err = load(vec![
        row(-1, NodeSpec::sequence("root")),
        row(0, NodeSpec::task("succeed", Params::new())),
        row(1, NodeSpec::task("fail", Params::new())),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        BuildError::TaskHasChildren {
            name: "succeed".into()
        }
    );
}

#[test]
fn corrupted_tree_is_repaired_before_running() {
    let corrupted = || {
        let mut tree = Tree::new(Behavior::sequence("root"));
        let root = tree.root();
        let leaf = tree
            .add_child(root, Behavior::task("leaf", Scripted::succeed("leaf")))
            .unwrap();
        if let Some(element) = tree.get_mut(leaf) {
            element.depth = 5;
        }
        tree
    };

    let tree = BehaviorTree::from_tree(corrupted(), RuntimeConfig::default()).unwrap();
    let mut h = Harness::new(tree);
    assert_eq!(h.tick(), Status::Success);

    let strict = RuntimeConfig {
        repair_on_load: false,
        ..RuntimeConfig::named("strict")
    };
    let err = BehaviorTree::from_tree(corrupted(), strict).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Tree(TreeError::TreeIntegrity(_))
    ));
}
