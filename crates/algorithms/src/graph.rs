use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Node, NodeId, Position},
    error::VizError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub label: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

/// Graph definition as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

/// Undirected graph. Neighbors are kept in edge-insertion order, which fixes
/// the order traversals discover them in.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<(NodeId, NodeId)>,
    adjacency: Vec<Vec<NodeId>>,
    by_label: HashMap<String, NodeId>,
}

impl Graph {
    pub fn from_spec(spec: &GraphSpec) -> Result<Self, VizError> {
        if spec.nodes.is_empty() {
            return Err(VizError::empty_graph());
        }

        let mut nodes = Vec::with_capacity(spec.nodes.len());
        let mut by_label = HashMap::with_capacity(spec.nodes.len());
        for (index, node) in spec.nodes.iter().enumerate() {
            let id = NodeId(index as u32);
            if by_label.insert(node.label.clone(), id).is_some() {
                return Err(VizError::duplicate_node(&node.label));
            }
            nodes.push(Node {
                id,
                label: node.label.clone(),
                position: Position {
                    x: node.x,
                    y: node.y,
                },
            });
        }

        let mut edges = Vec::with_capacity(spec.edges.len());
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (from, to) in &spec.edges {
            let (Some(&a), Some(&b)) = (by_label.get(from), by_label.get(to)) else {
                return Err(VizError::dangling_edge(from, to));
            };
            edges.push((a, b));
            adjacency[a.0 as usize].push(b);
            if a != b {
                adjacency[b.0 as usize].push(a);
            }
        }

        Ok(Self {
            nodes,
            edges,
            adjacency,
            by_label,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.adjacency
            .get(id.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.nodes
            .get(id.0 as usize)
            .map(|node| node.label.as_str())
            .unwrap_or("?")
    }

    pub fn find(&self, label: &str) -> Result<NodeId, VizError> {
        self.by_label
            .get(label)
            .copied()
            .ok_or_else(|| VizError::unknown_node(label))
    }
}

impl GraphSpec {
    /// The six-node tree used by the BFS/DFS walkthroughs.
    pub fn sample() -> Self {
        let node = |label: &str, x: f32, y: f32| NodeSpec {
            label: label.to_string(),
            x,
            y,
        };
        let edge = |a: &str, b: &str| (a.to_string(), b.to_string());
        Self {
            nodes: vec![
                node("A", 200.0, 50.0),
                node("B", 100.0, 150.0),
                node("C", 300.0, 150.0),
                node("D", 50.0, 250.0),
                node("E", 150.0, 250.0),
                node("F", 350.0, 250.0),
            ],
            edges: vec![
                edge("A", "B"),
                edge("A", "C"),
                edge("B", "D"),
                edge("B", "E"),
                edge("C", "F"),
            ],
        }
    }
}
