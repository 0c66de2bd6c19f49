use std::collections::HashMap;

use tracing::debug;

use crate::error::{DepmindError, Result};
use crate::id::IdAllocator;
use crate::ir::{DependencyEdge, NodeEntry};

/// Deduplicated adjacency over the labels of an edge list.
///
/// Nodes are addressed by index in first-appearance order; a synthesized
/// virtual root, when present, is always the last index.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<NodeEntry>,
    label_index: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    root_candidates: Vec<usize>,
    root: usize,
    virtual_root: Option<usize>,
}

impl DependencyGraph {
    /// Assigns ids, builds the adjacency, and picks the root. Several
    /// in-degree-zero nodes are gathered under a virtual root labelled
    /// `root_label`; none at all is [`DepmindError::NoRoot`].
    pub fn build(
        edges: &[DependencyEdge],
        root_label: &str,
        ids: &mut IdAllocator,
    ) -> Result<Self> {
        let mut nodes: Vec<NodeEntry> = Vec::new();
        let mut label_index: HashMap<String, usize> = HashMap::new();
        for edge in edges {
            for label in [&edge.source, &edge.target] {
                if !label_index.contains_key(label) {
                    label_index.insert(label.clone(), nodes.len());
                    nodes.push(NodeEntry {
                        id: ids.allocate(),
                        text: label.clone(),
                    });
                }
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let source = label_index[&edge.source];
            let target = label_index[&edge.target];
            let list = &mut children[source];
            if !list.contains(&target) {
                list.push(target);
            }
        }

        let mut in_degree = vec![0usize; nodes.len()];
        for targets in &children {
            for &target in targets {
                in_degree[target] += 1;
            }
        }

        let root_candidates: Vec<usize> = (0..nodes.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            candidates = root_candidates.len(),
            "built dependency graph"
        );

        let (root, virtual_root) = match root_candidates.as_slice() {
            [] => return Err(DepmindError::NoRoot),
            [only] => (*only, None),
            many => {
                let idx = nodes.len();
                nodes.push(NodeEntry {
                    id: ids.allocate(),
                    text: root_label.to_string(),
                });
                children.push(many.to_vec());
                in_degree.push(0);
                debug!(label = root_label, children = many.len(), "synthesized virtual root");
                (idx, Some(idx))
            }
        };

        Ok(Self {
            nodes,
            label_index,
            children,
            in_degree,
            root_candidates,
            root,
            virtual_root,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[NodeEntry] {
        &self.nodes
    }

    pub fn node_id(&self, idx: usize) -> &str {
        &self.nodes[idx].id
    }

    pub fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Distinct predecessors in the input relation. The virtual root does not
    /// count toward its children's degree.
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_degree[idx]
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn root_candidates(&self) -> &[usize] {
        &self.root_candidates
    }

    pub fn virtual_root(&self) -> Option<usize> {
        self.virtual_root
    }

    /// Index of a real (non-virtual) label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_index.get(label).copied()
    }

    pub fn id_of(&self, label: &str) -> Option<&str> {
        self.index_of(label).map(|idx| self.node_id(idx))
    }

    /// Every `(source, target)` pair of the deduplicated relation, virtual
    /// root included, sources in node order and targets in stored order.
    pub fn relations(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.children
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| targets.iter().map(move |&target| (source, target)))
    }
}
