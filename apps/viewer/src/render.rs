//! Plain-text frames for the terminal. Colors are reported as the hex codes
//! a graphical front end would paint with.

use std::fmt::Write as _;

use algorithms::Graph;
use shared::{
    domain::{Algorithm, BarState, EdgeState, NodeState},
    protocol::PlayerSnapshot,
    steps::{SortStep, TraversalStep},
};

pub fn node_color(state: NodeState) -> &'static str {
    match state {
        NodeState::Current => "#FF5733",
        NodeState::Frontier => "#FFCC00",
        NodeState::Visited => "#4CAF50",
        NodeState::Unvisited => "#BBDEFB",
    }
}

pub fn edge_color(state: EdgeState) -> &'static str {
    match state {
        EdgeState::Active => "#FF5733",
        EdgeState::Traversed => "#666666",
        EdgeState::Idle => "#DDDDDD",
    }
}

pub fn bar_color(state: BarState) -> &'static str {
    match state {
        BarState::Comparing => "#FFCC00",
        BarState::Sorted => "#4CAF50",
        BarState::Idle => "#BBDEFB",
    }
}

fn node_state_name(state: NodeState, algorithm: Algorithm) -> &'static str {
    match (state, algorithm) {
        (NodeState::Current, _) => "current",
        (NodeState::Frontier, Algorithm::DepthFirst) => "on stack",
        (NodeState::Frontier, _) => "in queue",
        (NodeState::Visited, _) => "visited",
        (NodeState::Unvisited, _) => "unvisited",
    }
}

pub trait StepRenderer<S>: Send + Sync + 'static {
    fn title(&self) -> &str;
    fn body(&self, step: &S) -> String;
}

pub struct GraphRenderer {
    graph: Graph,
    algorithm: Algorithm,
}

impl GraphRenderer {
    pub fn new(graph: Graph, algorithm: Algorithm) -> Self {
        Self { graph, algorithm }
    }
}

impl StepRenderer<TraversalStep> for GraphRenderer {
    fn title(&self) -> &str {
        self.algorithm.title()
    }

    fn body(&self, step: &TraversalStep) -> String {
        let mut out = String::new();

        out.push_str("Nodes:");
        for node in self.graph.nodes() {
            let state = step.node_state(node.id);
            let _ = write!(
                out,
                " {}[{} {}]",
                node.label,
                node_state_name(state, self.algorithm),
                node_color(state)
            );
        }
        out.push('\n');

        out.push_str("Edges:");
        for &(from, to) in self.graph.edges() {
            let _ = write!(
                out,
                " {}-{}[{}]",
                self.graph.label(from),
                self.graph.label(to),
                edge_color(step.edge_state(from, to))
            );
        }
        out.push('\n');

        let name = self.algorithm.frontier_name();
        if step.frontier.is_empty() {
            let short = match self.algorithm {
                Algorithm::DepthFirst => "DFS",
                _ => "BFS",
            };
            let _ = writeln!(out, "{name}: (empty - {short} is complete!)");
        } else {
            let labels: Vec<&str> = step
                .frontier
                .iter()
                .map(|&id| self.graph.label(id))
                .collect();
            let _ = writeln!(out, "{name}: {}  <- next to process", labels.join(" "));
        }

        out.push_str(&step.description);
        out
    }
}

#[derive(Debug, Default)]
pub struct BarRenderer;

impl StepRenderer<SortStep> for BarRenderer {
    fn title(&self) -> &str {
        Algorithm::BubbleSort.title()
    }

    fn body(&self, step: &SortStep) -> String {
        let mut out = String::new();
        for (index, value) in step.values.iter().enumerate() {
            let state = step.bar_state(index);
            let marker = match state {
                BarState::Comparing if step.swapped => "<> swapped",
                BarState::Comparing => "<> comparing",
                BarState::Sorted => "sorted",
                BarState::Idle => "",
            };
            let _ = writeln!(
                out,
                "{index:>2} {value:>3} {:<26} {} {marker}",
                "#".repeat((*value as usize).div_ceil(4)),
                bar_color(state),
            );
        }
        out.push_str(&step.description);
        out
    }
}

/// Title, body, counter and control row for one snapshot.
pub fn frame<S, R: StepRenderer<S> + ?Sized>(
    renderer: &R,
    snapshot: &PlayerSnapshot,
    step: Option<&S>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", renderer.title());
    if let Some(step) = step {
        let _ = writeln!(out, "{}", renderer.body(step));
    }
    if snapshot.is_complete() {
        let _ = writeln!(out, "{} (complete)", snapshot.counter_label());
    } else {
        let _ = writeln!(out, "{}", snapshot.counter_label());
    }
    let _ = write!(out, "{}", controls(snapshot));
    out
}

pub fn controls(snapshot: &PlayerSnapshot) -> String {
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!("[{label}]")
        } else {
            format!("({label})")
        }
    };
    format!(
        "{} {} {} {}  Speed: {} seconds",
        button("< Previous", snapshot.can_previous),
        button(if snapshot.playing { "Pause" } else { "Play" }, true),
        button("Next >", snapshot.can_next),
        button("Reset", true),
        snapshot.speed_ms as f64 / 1000.0,
    )
}
