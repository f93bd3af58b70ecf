use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnknownNode,
    DuplicateNode,
    DanglingEdge,
    EmptyGraph,
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct VizError {
    pub code: ErrorCode,
    pub message: String,
}

impl VizError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unknown_node(label: &str) -> Self {
        Self::new(ErrorCode::UnknownNode, format!("no node labelled '{label}'"))
    }

    pub fn duplicate_node(label: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateNode,
            format!("node '{label}' is defined more than once"),
        )
    }

    pub fn dangling_edge(from: &str, to: &str) -> Self {
        Self::new(
            ErrorCode::DanglingEdge,
            format!("edge {from}-{to} references a node that does not exist"),
        )
    }

    pub fn empty_graph() -> Self {
        Self::new(ErrorCode::EmptyGraph, "graph has no nodes")
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, message)
    }
}
