//! Renderable snapshots produced by the step generators.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{BarState, EdgeState, NodeId, NodeState};

/// One BFS/DFS snapshot. `frontier` is ordered next-to-process first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStep {
    pub frontier: Vec<NodeId>,
    pub visited: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<NodeId>,
    pub description: String,
}

impl TraversalStep {
    pub fn node_state(&self, node: NodeId) -> NodeState {
        if self.current == Some(node) {
            NodeState::Current
        } else if self.frontier.contains(&node) {
            NodeState::Frontier
        } else if self.visited.contains(&node) {
            NodeState::Visited
        } else {
            NodeState::Unvisited
        }
    }

    pub fn edge_state(&self, from: NodeId, to: NodeId) -> EdgeState {
        if !self.visited.contains(&from) || !self.visited.contains(&to) {
            return EdgeState::Idle;
        }
        if self.current == Some(from) || self.current == Some(to) {
            EdgeState::Active
        } else {
            EdgeState::Traversed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStep {
    pub values: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparing: Option<(usize, usize)>,
    pub swapped: bool,
    pub sorted: BTreeSet<usize>,
    pub description: String,
}

impl SortStep {
    pub fn bar_state(&self, index: usize) -> BarState {
        if self.sorted.contains(&index) {
            return BarState::Sorted;
        }
        match self.comparing {
            Some((left, right)) if index == left || index == right => BarState::Comparing,
            _ => BarState::Idle,
        }
    }
}
