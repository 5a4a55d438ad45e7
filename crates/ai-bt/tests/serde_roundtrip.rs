#![cfg(feature = "serde")]

use ai_bt::{NodeSpec, Param, Params, RuntimeConfig};
use ai_tree::FlatNode;

#[test]
fn node_specs_parse_from_json() {
    let json = r#"[
        {"depth": -1, "data": {"type": "selector", "name": "root"}},
        {"depth": 0, "data": {"type": "task", "task": "wait", "params": {"seconds": 1.5}}},
        {"depth": 0, "data": {"type": "task", "task": "move_to", "params": {"target": [1, 2, 3], "run": true}}}
    ]"#;

    let list: Vec<FlatNode<NodeSpec>> = serde_json::from_str(json).expect("parse asset");
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].data, NodeSpec::selector("root"));
    assert_eq!(
        list[1].data,
        NodeSpec::task("wait", Params::new().with("seconds", 1.5f64))
    );

    let NodeSpec::Task { params, .. } = &list[2].data else {
        panic!("expected a task node");
    };
    assert_eq!(params.get("target"), Some(&Param::Vector([1.0, 2.0, 3.0])));
    assert_eq!(params.bool_or("run", false), Ok(true));
}

#[test]
fn runtime_config_fills_defaults() {
    let config: RuntimeConfig = serde_json::from_str(r#"{"name": "guard"}"#).expect("parse");
    assert_eq!(config.name, "guard");
    assert!(config.repair_on_load);

    let json = serde_json::to_string(&config).expect("serialize");
    let back: RuntimeConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
