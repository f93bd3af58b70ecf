//! Breadth-first and depth-first step generators.
//!
//! Each generator runs the real traversal and records one snapshot per unit
//! of work, so the step table always matches the graph it was derived from.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use shared::{domain::NodeId, error::VizError, steps::TraversalStep};
use tracing::debug;

use crate::graph::Graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    BreadthFirst,
    DepthFirst,
}

pub fn traversal_steps(
    graph: &Graph,
    start: &str,
    order: TraversalOrder,
) -> Result<Vec<TraversalStep>, VizError> {
    match order {
        TraversalOrder::BreadthFirst => breadth_first_steps(graph, start),
        TraversalOrder::DepthFirst => depth_first_steps(graph, start),
    }
}

/// Queue-based traversal; nodes are marked visited when enqueued.
pub fn breadth_first_steps(graph: &Graph, start: &str) -> Result<Vec<TraversalStep>, VizError> {
    let start = graph.find(start)?;
    let start_label = graph.label(start);

    let mut queue = VecDeque::from([start]);
    let mut visited = vec![start];
    let mut seen = HashSet::from([start]);
    let mut steps = vec![TraversalStep {
        frontier: queue.iter().copied().collect(),
        visited: visited.clone(),
        current: Some(start),
        description: format!(
            "1. We start at node {start_label}. We add {start_label} to our queue and mark it as visited."
        ),
    }];

    while let Some(node) = queue.pop_front() {
        let label = graph.label(node);
        let mut added = Vec::new();
        for &neighbor in graph.neighbors(node) {
            if seen.insert(neighbor) {
                queue.push_back(neighbor);
                visited.push(neighbor);
                added.push(neighbor);
            }
        }

        let number = steps.len() + 1;
        let mut description = if added.is_empty() {
            format!(
                "{number}. We take {label} out of the queue. {label} has no unvisited neighbors, so we do nothing."
            )
        } else {
            let names = join_labels(graph, &added);
            format!(
                "{number}. We take {label} out of the queue and look at its unvisited neighbors ({names}). We add {} to our queue and mark {} as visited.",
                pronoun(&added),
                pronoun(&added),
            )
        };
        if queue.is_empty() {
            description.push_str(" Our queue is now empty, so BFS is complete!");
        }

        steps.push(TraversalStep {
            frontier: queue.iter().copied().collect(),
            visited: visited.clone(),
            current: Some(node),
            description,
        });
    }

    debug!(start = start_label, steps = steps.len(), "derived bfs steps");
    Ok(steps)
}

/// Explicit-stack traversal; nodes are marked visited when popped, so a node
/// pushed twice shows up once as a skipped step.
pub fn depth_first_steps(graph: &Graph, start: &str) -> Result<Vec<TraversalStep>, VizError> {
    let start = graph.find(start)?;
    let start_label = graph.label(start);

    // Top of the stack is the last element.
    let mut stack = vec![start];
    let mut visited: Vec<NodeId> = Vec::new();
    let mut steps = vec![TraversalStep {
        frontier: top_first(&stack),
        visited: Vec::new(),
        current: None,
        description: format!("1. We start at node {start_label} by pushing it onto our stack."),
    }];

    while let Some(node) = stack.pop() {
        let label = graph.label(node);
        let number = steps.len() + 1;

        let mut description = if visited.contains(&node) {
            format!("{number}. We pop {label} from the stack, but it was already visited, so we skip it.")
        } else {
            visited.push(node);
            let pushed: Vec<NodeId> = graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|neighbor| !visited.contains(neighbor))
                .collect();
            stack.extend(pushed.iter().rev());

            if pushed.is_empty() {
                format!(
                    "{number}. We pop {label} from the stack and mark it as visited. {label} has no unvisited neighbors to push."
                )
            } else {
                format!(
                    "{number}. We pop {label} from the stack and mark it as visited. We push its unvisited neighbors ({}) onto the stack.",
                    join_labels(graph, &pushed)
                )
            }
        };
        if stack.is_empty() {
            description.push_str(" Our stack is now empty, so DFS is complete!");
        }

        steps.push(TraversalStep {
            frontier: top_first(&stack),
            visited: visited.clone(),
            current: Some(node),
            description,
        });
    }

    debug!(start = start_label, steps = steps.len(), "derived dfs steps");
    Ok(steps)
}

fn top_first(stack: &[NodeId]) -> Vec<NodeId> {
    stack.iter().rev().copied().collect()
}

fn pronoun(nodes: &[NodeId]) -> &'static str {
    if nodes.len() == 1 {
        "it"
    } else {
        "them"
    }
}

fn join_labels(graph: &Graph, nodes: &[NodeId]) -> String {
    let labels: Vec<&str> = nodes.iter().map(|&id| graph.label(id)).collect();
    match labels.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}
