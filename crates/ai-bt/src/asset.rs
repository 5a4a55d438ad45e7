//! Data-driven tree assets.
//!
//! An asset is a depth-tagged pre-order list of [`NodeSpec`]s. Control flow
//! nodes are built in; task nodes are turned into [`Task`]s by a
//! caller-provided [`TaskFactory`].

use std::collections::BTreeMap;

use ai_core::WorldMut;
use ai_nav::Vec3;
use ai_tree::FlatNode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Behavior, BehaviorKind, BehaviorTree, BuildError, RuntimeConfig, Task};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum NodeSpec {
    Sequence {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Selector {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Inverter {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Succeeder {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Failer {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },
    Task {
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
        task: String,
        #[cfg_attr(feature = "serde", serde(default))]
        params: Params,
    },
}

impl NodeSpec {
    pub fn sequence(name: impl Into<String>) -> Self {
        NodeSpec::Sequence {
            name: Some(name.into()),
        }
    }

    pub fn selector(name: impl Into<String>) -> Self {
        NodeSpec::Selector {
            name: Some(name.into()),
        }
    }

    pub fn task(task: impl Into<String>, params: Params) -> Self {
        NodeSpec::Task {
            name: None,
            task: task.into(),
            params,
        }
    }

    /// Explicit name, falling back to the task type or node kind.
    pub fn display_name(&self) -> &str {
        match self {
            NodeSpec::Sequence { name } => name.as_deref().unwrap_or("sequence"),
            NodeSpec::Selector { name } => name.as_deref().unwrap_or("selector"),
            NodeSpec::Inverter { name } => name.as_deref().unwrap_or("inverter"),
            NodeSpec::Succeeder { name } => name.as_deref().unwrap_or("succeeder"),
            NodeSpec::Failer { name } => name.as_deref().unwrap_or("failer"),
            NodeSpec::Task { name, task, .. } => name.as_deref().unwrap_or(task),
        }
    }

    pub fn into_behavior<W, F>(self, factory: &F) -> Result<Behavior<W>, BuildError>
    where
        W: WorldMut + 'static,
        F: TaskFactory<W> + ?Sized,
    {
        let name = self.display_name().to_string();
        Ok(match self {
            NodeSpec::Sequence { .. } => Behavior::sequence(name),
            NodeSpec::Selector { .. } => Behavior::selector(name),
            NodeSpec::Inverter { .. } => Behavior::inverter(name),
            NodeSpec::Succeeder { .. } => Behavior::succeeder(name),
            NodeSpec::Failer { .. } => Behavior::failer(name),
            NodeSpec::Task { task, params, .. } => Behavior::new(
                name,
                BehaviorKind::Task(factory.create(&task, &params)?),
            ),
        })
    }
}

/// A single task parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Param {
    Bool(bool),
    Number(f64),
    Text(String),
    Vector([f32; 3]),
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Number(value)
    }
}

impl From<f32> for Param {
    fn from(value: f32) -> Self {
        Param::Number(f64::from(value))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<Vec3> for Param {
    fn from(value: Vec3) -> Self {
        Param::Vector([value.x, value.y, value.z])
    }
}

/// Named task parameters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Params(BTreeMap<String, Param>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn require(&self, key: &str) -> Result<&Param, BuildError> {
        self.get(key).ok_or_else(|| BuildError::MissingParam {
            param: key.to_string(),
        })
    }

    fn invalid(key: &str, expected: &'static str) -> BuildError {
        BuildError::InvalidParam {
            param: key.to_string(),
            expected,
        }
    }

    pub fn f32(&self, key: &str) -> Result<f32, BuildError> {
        match self.require(key)? {
            Param::Number(n) if n.is_finite() => Ok(*n as f32),
            _ => Err(Self::invalid(key, "a finite number")),
        }
    }

    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, BuildError> {
        if self.get(key).is_some() {
            self.f32(key)
        } else {
            Ok(default)
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, BuildError> {
        match self.get(key) {
            None => Ok(default),
            Some(Param::Bool(b)) => Ok(*b),
            Some(_) => Err(Self::invalid(key, "a boolean")),
        }
    }

    pub fn text(&self, key: &str) -> Result<&str, BuildError> {
        match self.require(key)? {
            Param::Text(s) => Ok(s.as_str()),
            _ => Err(Self::invalid(key, "a string")),
        }
    }

    pub fn vec3(&self, key: &str) -> Result<Vec3, BuildError> {
        match self.require(key)? {
            Param::Vector(v) => Ok(Vec3::from(*v)),
            _ => Err(Self::invalid(key, "a [x, y, z] vector")),
        }
    }
}

/// Turns task nodes of an asset into runnable tasks.
pub trait TaskFactory<W>
where
    W: WorldMut + 'static,
{
    fn create(&self, task: &str, params: &Params) -> Result<Box<dyn Task<W>>, BuildError>;
}

/// Build a runnable tree from an asset.
pub fn load_tree<W, F>(
    list: Vec<FlatNode<NodeSpec>>,
    factory: &F,
    config: RuntimeConfig,
) -> Result<BehaviorTree<W>, BuildError>
where
    W: WorldMut + 'static,
    F: TaskFactory<W> + ?Sized,
{
    let behaviors = list
        .into_iter()
        .map(|row| {
            let depth = row.depth;
            row.data
                .into_behavior(factory)
                .map(|behavior| FlatNode::new(depth, behavior))
        })
        .collect::<Result<Vec<_>, _>>()?;
    BehaviorTree::from_list(behaviors, config)
}
