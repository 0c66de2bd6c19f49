use std::collections::VecDeque;

use tracing::{debug, warn};

use super::Tree;
use crate::graph::DependencyGraph;
use crate::id::IdAllocator;
use crate::ir::{AdditionalEdge, TreeDocument};

/// Spanning tree of a dependency graph plus every relation it leaves out.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub tree: Tree,
    pub additional_edges: Vec<AdditionalEdge>,
}

impl Extraction {
    pub fn into_document(self, graph: &DependencyGraph) -> TreeDocument {
        TreeDocument {
            structure: self.tree.to_structure(),
            additional_edges: self.additional_edges,
            nodes: graph.nodes().to_vec(),
        }
    }
}

/// Breadth-first spanning tree from the graph root.
///
/// Each node is attached under the first parent that reaches it, children in
/// adjacency order. Relations that did not become a parent-child link are
/// returned as additional edges with fresh ids, in relation order.
pub fn extract_tree(graph: &DependencyGraph, ids: &mut IdAllocator) -> Extraction {
    let root = graph.root();
    let mut tree = Tree::with_root(graph.node_id(root));
    let mut slot_of: Vec<Option<usize>> = vec![None; graph.len()];
    slot_of[root] = Some(0);

    let mut queue: VecDeque<(usize, usize)> = VecDeque::from([(root, 0)]);
    while let Some((node, slot)) = queue.pop_front() {
        for &child in graph.children(node) {
            if slot_of[child].is_some() {
                continue;
            }
            let child_slot = tree.push_child(slot, graph.node_id(child));
            slot_of[child] = Some(child_slot);
            queue.push_back((child, child_slot));
        }
    }

    if tree.len() < graph.len() {
        warn!(
            reachable = tree.len(),
            total = graph.len(),
            "some nodes are not reachable from the root and are left out of the tree"
        );
    }

    let mut additional_edges = Vec::new();
    for (source, target) in graph.relations() {
        let is_tree_edge = match (slot_of[source], slot_of[target]) {
            (Some(parent), Some(child)) => tree.slot_parent(child) == Some(parent),
            _ => false,
        };
        if !is_tree_edge {
            additional_edges.push(AdditionalEdge {
                id: ids.allocate(),
                from_id: graph.node_id(source).to_string(),
                to_id: graph.node_id(target).to_string(),
            });
        }
    }
    debug!(
        tree_nodes = tree.len(),
        additional_edges = additional_edges.len(),
        "extracted spanning tree"
    );

    Extraction {
        tree,
        additional_edges,
    }
}


#[cfg(test)]
mod proptests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::error::DepmindError;
    use crate::ir::DependencyEdge;
    use crate::tree::VerticalOrder;

    fn arb_edges() -> impl Strategy<Value = Vec<DependencyEdge>> {
        prop::collection::vec((0u8..8, 0u8..8), 1..24).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(source, target)| {
                    DependencyEdge::new(format!("n{source}"), format!("n{target}"))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn relations_split_between_tree_and_additional(
            edges in arb_edges(),
            seed in any::<u64>()
        ) {
            let mut ids = IdAllocator::with_seed(seed);
            let graph = match DependencyGraph::build(&edges, "root", &mut ids) {
                Ok(graph) => graph,
                Err(DepmindError::NoRoot) => return Ok(()),
                Err(err) => return Err(TestCaseError::fail(err.to_string())),
            };
            let extraction = extract_tree(&graph, &mut ids);
            let tree = &extraction.tree;

            let mut extra: HashSet<(&str, &str)> = HashSet::new();
            for edge in &extraction.additional_edges {
                prop_assert!(extra.insert((edge.from_id.as_str(), edge.to_id.as_str())));
            }
            let mut tree_edges = 0;
            for (source, target) in graph.relations() {
                let from = graph.node_id(source);
                let to = graph.node_id(target);
                let in_tree = tree.has_tree_edge(from, to);
                prop_assert!(in_tree ^ extra.contains(&(from, to)));
                if in_tree {
                    tree_edges += 1;
                }
            }
            prop_assert_eq!(tree_edges, tree.len() - 1);
            prop_assert_eq!(tree_edges + extra.len(), graph.relations().count());
        }

        #[test]
        fn vertical_order_is_antisymmetric(edges in arb_edges()) {
            let mut ids = IdAllocator::with_seed(1);
            let Ok(graph) = DependencyGraph::build(&edges, "root", &mut ids) else {
                return Ok(());
            };
            let tree = extract_tree(&graph, &mut ids).tree;
            let order = tree.preorder();
            for &first in &order {
                for &second in &order {
                    let result = tree.compare_vertical_position(first, second);
                    if tree.level(first) != tree.level(second) {
                        let is_mismatch = matches!(result, Err(DepmindError::LevelMismatch { .. }));
                        prop_assert!(is_mismatch);
                        continue;
                    }
                    let forward = result.map_err(|err| TestCaseError::fail(err.to_string()))?;
                    if first == second {
                        prop_assert_eq!(forward, Some(VerticalOrder::Below));
                        continue;
                    }
                    let backward = tree
                        .compare_vertical_position(second, first)
                        .map_err(|err| TestCaseError::fail(err.to_string()))?;
                    prop_assert_eq!(forward.map(VerticalOrder::reverse), backward);
                    prop_assert!(forward.is_some());
                }
            }
        }
    }
}
