//! Linking two independently generated trees through a third edge list.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::id::IdAllocator;
use crate::ir::{CrossTreeEdge, DependencyEdge, TreeDocument};
use crate::tree::generate_tree;

#[derive(Debug, Clone)]
pub struct FusedTrees {
    pub primary: TreeDocument,
    pub secondary: TreeDocument,
    pub cross_edges: Vec<CrossTreeEdge>,
}

/// Keeps the fusion edges that run from one tree into the other and tags
/// each with the side its source is on: `1` for the primary tree, `-1` for
/// the secondary.
///
/// Labels are matched by text. When both trees know a label, the secondary
/// tree's id is used.
pub fn classify_cross_edges(
    primary: &TreeDocument,
    secondary: &TreeDocument,
    fusion: &[DependencyEdge],
    ids: &mut IdAllocator,
) -> Vec<CrossTreeEdge> {
    let primary_labels: HashSet<&str> = primary.nodes.iter().map(|n| n.text.as_str()).collect();
    let secondary_labels: HashSet<&str> =
        secondary.nodes.iter().map(|n| n.text.as_str()).collect();
    let label_ids: HashMap<&str, &str> = primary
        .nodes
        .iter()
        .chain(&secondary.nodes)
        .map(|n| (n.text.as_str(), n.id.as_str()))
        .collect();

    let mut cross = Vec::new();
    for edge in fusion {
        let source = edge.source.as_str();
        let target = edge.target.as_str();
        let (Some(from_id), Some(to_id)) = (label_ids.get(source), label_ids.get(target)) else {
            continue;
        };
        let source_in_primary = primary_labels.contains(source);
        if source_in_primary && !secondary_labels.contains(target) {
            continue;
        }
        if secondary_labels.contains(source) && !primary_labels.contains(target) {
            continue;
        }
        cross.push(CrossTreeEdge {
            id: ids.allocate(),
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            right: if source_in_primary { 1 } else { -1 },
        });
    }
    debug!(
        proposed = fusion.len(),
        kept = cross.len(),
        "classified cross-tree edges"
    );
    cross
}

/// Builds both trees from one allocator, so ids stay distinct across the
/// combined document, then classifies the fusion edges.
pub fn generate_fused_trees(
    primary: (&[DependencyEdge], &str),
    secondary: (&[DependencyEdge], &str),
    fusion: &[DependencyEdge],
    ids: &mut IdAllocator,
) -> Result<FusedTrees> {
    let primary = generate_tree(primary.0, primary.1, ids)?;
    let secondary = generate_tree(secondary.0, secondary.1, ids)?;
    let cross_edges = classify_cross_edges(&primary, &secondary, fusion, ids);
    Ok(FusedTrees {
        primary,
        secondary,
        cross_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<DependencyEdge> {
        pairs
            .iter()
            .map(|(source, target)| DependencyEdge::new(*source, *target))
            .collect()
    }

    fn fused(fusion: &[(&str, &str)]) -> FusedTrees {
        let mut ids = IdAllocator::with_seed(21);
        generate_fused_trees(
            (&edges(&[("ml", "trees"), ("ml", "regression")]), "ml"),
            (&edges(&[("stats", "variance"), ("stats", "bias")]), "stats"),
            &edges(fusion),
            &mut ids,
        )
        .unwrap()
    }

    fn id_of<'a>(doc: &'a TreeDocument, text: &str) -> &'a str {
        doc.nodes
            .iter()
            .find(|n| n.text == text)
            .map(|n| n.id.as_str())
            .unwrap()
    }

    #[test]
    fn ids_are_distinct_across_trees() {
        let trees = fused(&[]);
        let all: HashSet<&str> = trees
            .primary
            .nodes
            .iter()
            .chain(&trees.secondary.nodes)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(all.len(), trees.primary.nodes.len() + trees.secondary.nodes.len());
    }

    #[test]
    fn sides_follow_source_tree() {
        let trees = fused(&[("trees", "variance"), ("bias", "regression")]);
        assert_eq!(trees.cross_edges.len(), 2);
        let first = &trees.cross_edges[0];
        assert_eq!(first.right, 1);
        assert_eq!(first.from_id, id_of(&trees.primary, "trees"));
        assert_eq!(first.to_id, id_of(&trees.secondary, "variance"));
        let second = &trees.cross_edges[1];
        assert_eq!(second.right, -1);
        assert_eq!(second.from_id, id_of(&trees.secondary, "bias"));
    }

    #[test]
    fn unknown_and_same_side_edges_are_dropped() {
        let trees = fused(&[
            ("trees", "regression"),
            ("variance", "bias"),
            ("trees", "nowhere"),
            ("ghost", "variance"),
        ]);
        assert!(trees.cross_edges.is_empty());
    }

    #[test]
    fn shared_label_resolves_to_secondary_tree() {
        let mut ids = IdAllocator::with_seed(22);
        let primary =
            generate_tree(&edges(&[("ml", "trees"), ("ml", "variance")]), "ml", &mut ids).unwrap();
        let secondary =
            generate_tree(&edges(&[("stats", "variance"), ("stats", "bias")]), "stats", &mut ids)
                .unwrap();
        let cross = classify_cross_edges(
            &primary,
            &secondary,
            &edges(&[("trees", "variance"), ("bias", "variance")]),
            &mut ids,
        );

        let shared = id_of(&secondary, "variance");
        assert_ne!(shared, id_of(&primary, "variance"));
        assert_eq!(cross.len(), 2);
        assert_eq!(cross[0].from_id, id_of(&primary, "trees"));
        assert_eq!(cross[0].to_id, shared);
        assert_eq!(cross[0].right, 1);
        assert_eq!(cross[1].from_id, id_of(&secondary, "bias"));
        assert_eq!(cross[1].to_id, shared);
        assert_eq!(cross[1].right, -1);
    }
}
