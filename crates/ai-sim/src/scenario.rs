use std::path::Path;

use ai_bt::{NodeSpec, RuntimeConfig};
use ai_nav::Bounds;
use ai_tree::FlatNode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Ticks to run when the command line does not say otherwise.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Seconds per tick
    #[serde(default = "default_dt")]
    pub dt: f32,

    #[serde(default)]
    pub agent: AgentConfig,

    /// Patrol points, stored on the global blackboard as `waypoints`.
    #[serde(default)]
    pub waypoints: Vec<[f32; 3]>,

    /// Move targets outside these bounds are rejected.
    #[serde(default)]
    pub bounds: Option<Bounds>,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Depth-tagged pre-order node list.
    pub tree: Vec<FlatNode<NodeSpec>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub id: u32,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default)]
    pub start: [f32; 3],
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            id: 0,
            speed: default_speed(),
            start: [0.0; 3],
        }
    }
}

fn default_ticks() -> u64 {
    100
}

fn default_dt() -> f32 {
    0.1
}

fn default_speed() -> f32 {
    1.0
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        anyhow::ensure!(
            scenario.dt.is_finite() && scenario.dt >= 0.0,
            "dt must be a non-negative number, got {}",
            scenario.dt
        );
        Ok(scenario)
    }
}
