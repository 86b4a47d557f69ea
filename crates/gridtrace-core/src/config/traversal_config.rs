//! Traversal configuration used by the prebuilt network traces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CAN_STOP_ON_START_ITEM;
use crate::errors::ConfigError;

/// Queue discipline for a traversal's item queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueDiscipline {
    /// FIFO: visit everything at step n before step n + 1.
    #[default]
    BreadthFirst,
    /// LIFO: follow one path to its end before backtracking.
    DepthFirst,
}

impl QueueDiscipline {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
        }
    }
}

impl fmt::Display for QueueDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueueDiscipline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breadth_first" | "bfs" => Ok(Self::BreadthFirst),
            "depth_first" | "dfs" => Ok(Self::DepthFirst),
            other => Err(ConfigError::InvalidValue {
                field: "traversal.queue".to_string(),
                message: format!("unknown queue discipline '{other}'"),
            }),
        }
    }
}

/// Settings applied to every prebuilt network trace.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TraversalSettings {
    /// Item queue discipline. Default: breadth-first.
    pub queue: Option<QueueDiscipline>,
    /// Whether stop conditions apply to the start item. Default: true.
    pub can_stop_on_start_item: Option<bool>,
    /// Optional cap on equipment steps from the start item. Must be > 0.
    pub max_equipment_steps: Option<u32>,
}

impl TraversalSettings {
    /// Returns the effective queue discipline, defaulting to breadth-first.
    pub fn effective_queue(&self) -> QueueDiscipline {
        self.queue.unwrap_or_default()
    }

    /// Returns the effective start-item stop permission, defaulting to true.
    pub fn effective_can_stop_on_start_item(&self) -> bool {
        self.can_stop_on_start_item
            .unwrap_or(DEFAULT_CAN_STOP_ON_START_ITEM)
    }
}
