use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which side of the root the mind map fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "right" => Some(Self::Right),
            "left" => Some(Self::Left),
            _ => None,
        }
    }

    pub fn sign(self) -> i32 {
        match self {
            Self::Right => 1,
            Self::Left => -1,
        }
    }
}

/// A directed "target refines source" relation between two labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

// Flattens the subtree before dropping so long chains do not recurse.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalEdge {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
}

/// Link between two independently built trees, already tagged with the side
/// the source sits on (`1` for the first tree, `-1` for the second).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossTreeEdge {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub right: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDocument {
    pub structure: TreeNode,
    #[serde(default)]
    pub additional_edges: Vec<AdditionalEdge>,
    pub nodes: Vec<NodeEntry>,
}

impl TreeDocument {
    /// Id to label lookup. Later entries win if an id repeats.
    pub fn labels(&self) -> HashMap<&str, &str> {
        self.nodes
            .iter()
            .map(|node| (node.id.as_str(), node.text.as_str()))
            .collect()
    }
}
