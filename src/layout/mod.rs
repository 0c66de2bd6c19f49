//! Mind-map rendering of an extracted tree: nested node records plus curved
//! relationship lines for the edges the tree left out.

mod lines;
mod nodes;
pub mod types;

pub use lines::{cross_level_line, layout_cross_tree_lines, same_level_line};
pub use types::*;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::ir::{Direction, TreeDocument};
use crate::tree::Tree;

pub fn compute_layout(
    doc: &TreeDocument,
    direction: Direction,
    config: &LayoutConfig,
) -> Result<MindmapLayout> {
    let tree = Tree::from_structure(&doc.structure);
    debug!(nodes = tree.len(), depth = tree.depth(), ?direction, "laying out tree");
    let root = nodes::layout_nodes(doc, &tree, direction);
    let lines = lines::layout_lines(&doc.additional_edges, &tree, direction, config)?;
    Ok(MindmapLayout { root, lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdAllocator;
    use crate::ir::DependencyEdge;
    use crate::tree::generate_tree;

    #[test]
    fn diamond_layout() {
        let edges = vec![
            DependencyEdge::new("A", "B"),
            DependencyEdge::new("A", "C"),
            DependencyEdge::new("B", "D"),
            DependencyEdge::new("C", "D"),
        ];
        let mut ids = IdAllocator::with_seed(2);
        let doc = generate_tree(&edges, "root", &mut ids).unwrap();
        let layout = compute_layout(&doc, Direction::Right, &LayoutConfig::default()).unwrap();

        assert_eq!(layout.root.data.text, "A");
        assert_eq!(layout.root.data.mind_layout_split_index, Some(2));
        let texts: Vec<&str> = layout
            .root
            .children
            .iter()
            .map(|child| child.data.text.as_str())
            .collect();
        assert_eq!(texts, vec!["B", "C"]);
        assert_eq!(layout.root.children[0].children[0].data.text, "D");

        // C (level 2) -> D (level 3): source is shallower, anchored left.
        assert_eq!(layout.lines.len(), 1);
        let line = &layout.lines[0].data;
        assert_eq!((line.from_angle, line.to_angle), (0, 180));
        assert_eq!(line.relative_control1, Point::new(75, 0));
    }

    #[test]
    fn virtual_root_layout() {
        let edges = vec![DependencyEdge::new("X", "Y"), DependencyEdge::new("Z", "Y")];
        let mut ids = IdAllocator::with_seed(2);
        let doc = generate_tree(&edges, "topic", &mut ids).unwrap();
        let layout = compute_layout(&doc, Direction::Right, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.root.data.text, "topic");
        assert_eq!(layout.root.children.len(), 2);
        // Z (level 2) -> Y (level 3).
        let line = &layout.lines[0].data;
        assert_eq!((line.from_angle, line.to_angle), (0, 180));
    }

    #[test]
    fn sibling_edge_uses_vertical_curve() {
        let edges = vec![
            DependencyEdge::new("A", "B"),
            DependencyEdge::new("A", "C"),
            DependencyEdge::new("C", "B"),
        ];
        let mut ids = IdAllocator::with_seed(4);
        let doc = generate_tree(&edges, "root", &mut ids).unwrap();
        let layout = compute_layout(&doc, Direction::Right, &LayoutConfig::default()).unwrap();
        // C comes after B under A, so the line bulges the other way.
        let line = &layout.lines[0].data;
        assert_eq!((line.from_angle, line.to_angle), (-90, 90));
        assert_eq!(line.relative_control1, Point::new(0, -12));
    }
}
