#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeConfig {
    /// Shown in logs to tell trees apart.
    pub name: String,
    /// Try to fix malformed depths / links once before refusing a tree.
    pub repair_on_load: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "behavior_tree".to_string(),
            repair_on_load: true,
        }
    }
}

impl RuntimeConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
