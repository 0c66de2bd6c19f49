use std::collections::HashMap;

use crate::error::Result;
use crate::id::IdAllocator;
use crate::ir::{DependencyEdge, TreeDocument, TreeNode};

mod extract;
mod level;
mod position;

pub use extract::{Extraction, extract_tree};
pub use position::VerticalOrder;

use crate::graph::DependencyGraph;

#[derive(Debug, Clone)]
struct Slot {
    id: String,
    parent: Option<usize>,
    children: Vec<usize>,
    level: usize,
}

/// Arena-backed rooted tree keyed by node id.
///
/// Slot 0 is the root and every child slot is pushed after its parent, so a
/// reverse scan over the slots visits children before parents.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl Tree {
    pub(crate) fn with_root(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut index = HashMap::new();
        index.insert(id.clone(), 0);
        Self {
            slots: vec![Slot {
                id,
                parent: None,
                children: Vec::new(),
                level: 1,
            }],
            index,
        }
    }

    pub(crate) fn push_child(&mut self, parent: usize, id: impl Into<String>) -> usize {
        let id = id.into();
        let slot = self.slots.len();
        let level = self.slots[parent].level + 1;
        self.index.entry(id.clone()).or_insert(slot);
        self.slots.push(Slot {
            id,
            parent: Some(parent),
            children: Vec::new(),
            level,
        });
        self.slots[parent].children.push(slot);
        slot
    }

    /// Rebuilds the arena from a nested structure, e.g. one read back from a
    /// tree document. If an id repeats, lookups resolve to the occurrence
    /// that was placed first.
    pub fn from_structure(structure: &TreeNode) -> Self {
        let mut tree = Self::with_root(structure.id.clone());
        let mut stack: Vec<(&TreeNode, usize)> = vec![(structure, 0)];
        while let Some((node, slot)) = stack.pop() {
            let mut pushed = Vec::with_capacity(node.children.len());
            for child in &node.children {
                pushed.push((child, tree.push_child(slot, child.id.clone())));
            }
            stack.extend(pushed.into_iter().rev());
        }
        tree
    }

    pub fn to_structure(&self) -> TreeNode {
        let mut built: Vec<Option<TreeNode>> = vec![None; self.slots.len()];
        for idx in (0..self.slots.len()).rev() {
            let slot = &self.slots[idx];
            let children = slot
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[idx] = Some(TreeNode {
                id: slot.id.clone(),
                children,
            });
        }
        built
            .into_iter()
            .next()
            .flatten()
            .unwrap_or_else(|| TreeNode::leaf(String::new()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn root_id(&self) -> &str {
        &self.slots[0].id
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        let slot = self.slot_of(id)?;
        self.slots[slot]
            .parent
            .map(|parent| self.slots[parent].id.as_str())
    }

    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.slot_of(id)
            .map(|slot| {
                self.slots[slot]
                    .children
                    .iter()
                    .map(|&child| self.slots[child].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `to` hangs directly under `from`.
    pub fn has_tree_edge(&self, from: &str, to: &str) -> bool {
        match (self.slot_of(from), self.slot_of(to)) {
            (Some(from), Some(to)) => self.slots[to].parent == Some(from),
            _ => false,
        }
    }

    /// Node ids in depth-first pre-order, children in stored order.
    pub fn preorder(&self) -> Vec<&str> {
        self.preorder_slots()
            .into_iter()
            .map(|slot| self.slots[slot].id.as_str())
            .collect()
    }

    pub(crate) fn preorder_slots(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack = vec![0usize];
        while let Some(slot) = stack.pop() {
            order.push(slot);
            stack.extend(self.slots[slot].children.iter().rev().copied());
        }
        order
    }

    pub(crate) fn slot_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn slot_id(&self, slot: usize) -> &str {
        &self.slots[slot].id
    }

    pub(crate) fn slot_children(&self, slot: usize) -> &[usize] {
        &self.slots[slot].children
    }

    pub(crate) fn slot_level(&self, slot: usize) -> usize {
        self.slots[slot].level
    }

    pub(crate) fn slot_parent(&self, slot: usize) -> Option<usize> {
        self.slots[slot].parent
    }
}

/// Builds the graph, extracts the spanning tree and packs both into a tree
/// document.
pub fn generate_tree(
    edges: &[DependencyEdge],
    root_label: &str,
    ids: &mut IdAllocator,
) -> Result<TreeDocument> {
    let graph = DependencyGraph::build(edges, root_label, ids)?;
    let extraction = extract_tree(&graph, ids);
    Ok(extraction.into_document(&graph))
}
