use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::VizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    BubbleSort,
}

impl Algorithm {
    pub fn title(self) -> &'static str {
        match self {
            Self::BreadthFirst => "Breadth First Search (BFS)",
            Self::DepthFirst => "Depth First Search (DFS)",
            Self::BubbleSort => "Bubble Sort",
        }
    }

    /// Name of the pending-work structure shown next to the graph.
    pub fn frontier_name(self) -> &'static str {
        match self {
            Self::BreadthFirst => "Queue",
            Self::DepthFirst => "Stack",
            Self::BubbleSort => "Array",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Unvisited,
    Frontier,
    Visited,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeState {
    Idle,
    Traversed,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarState {
    Idle,
    Comparing,
    Sorted,
}

/// Bounds for the delay between automatic advances, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min_ms: u64,
    pub max_ms: u64,
    pub step_ms: u64,
    pub default_ms: u64,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self {
            min_ms: 500,
            max_ms: 3000,
            step_ms: 500,
            default_ms: 1500,
        }
    }
}

impl SpeedRange {
    pub fn new(min_ms: u64, max_ms: u64, step_ms: u64, default_ms: u64) -> Result<Self, VizError> {
        if min_ms == 0 {
            return Err(VizError::invalid_config("minimum speed must be positive"));
        }
        if min_ms > max_ms {
            return Err(VizError::invalid_config(format!(
                "speed range is inverted: min {min_ms}ms > max {max_ms}ms"
            )));
        }
        let mut range = Self {
            min_ms,
            max_ms,
            step_ms,
            default_ms,
        };
        range.default_ms = range.clamp(default_ms);
        Ok(range)
    }

    pub fn clamp(&self, ms: u64) -> u64 {
        ms.clamp(self.min_ms, self.max_ms)
    }

    /// Moves `ms` one `step_ms` notch slower (`notches > 0`) or faster,
    /// staying inside the range.
    pub fn nudge(&self, ms: u64, notches: i64) -> u64 {
        let delta = self.step_ms.saturating_mul(notches.unsigned_abs());
        let moved = if notches >= 0 {
            ms.saturating_add(delta)
        } else {
            ms.saturating_sub(delta)
        };
        self.clamp(moved)
    }

    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(self.default_ms)
    }
}
