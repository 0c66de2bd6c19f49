use tracing::warn;

use super::types::{LayoutEdge, LineData, LineStyle, Point};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::ir::{AdditionalEdge, CrossTreeEdge, Direction};
use crate::tree::{Tree, VerticalOrder};

fn curve(
    id: &str,
    from_id: &str,
    to_id: &str,
    angles: (i32, i32),
    controls: (Point, Point),
) -> LayoutEdge {
    LayoutEdge {
        data: LineData {
            id: id.to_string(),
            from_id: from_id.to_string(),
            from_angle: angles.0,
            to_id: to_id.to_string(),
            to_angle: angles.1,
            relative_control1: controls.0,
            relative_control2: controls.1,
            text: String::new(),
            html: String::new(),
        },
        style: LineStyle::default(),
    }
}

/// Edge between two nodes on one level: leaves and enters vertically,
/// bulging toward the side the source is on.
pub fn same_level_line(
    id: &str,
    from_id: &str,
    to_id: &str,
    order: VerticalOrder,
    config: &LayoutConfig,
) -> LayoutEdge {
    let s = order.sign();
    let offset = config.same_level_offset;
    curve(
        id,
        from_id,
        to_id,
        (90 * s, -90 * s),
        (Point::new(0, offset * s), Point::new(0, -offset * s)),
    )
}

/// Edge between levels, anchored horizontally. `s` is `1` when the source
/// sits on the left of the target in the drawn map, `-1` otherwise.
pub fn cross_level_line(
    id: &str,
    from_id: &str,
    to_id: &str,
    s: i32,
    config: &LayoutConfig,
) -> LayoutEdge {
    let offset = config.cross_level_offset;
    curve(
        id,
        from_id,
        to_id,
        (90 - 90 * s, 90 + 90 * s),
        (Point::new(offset * s, 0), Point::new(-offset * s, 0)),
    )
}

/// Turns the additional edges of one tree into relationship lines.
///
/// Edges touching a node outside the tree are skipped with a warning.
pub(super) fn layout_lines(
    edges: &[AdditionalEdge],
    tree: &Tree,
    direction: Direction,
    config: &LayoutConfig,
) -> Result<Vec<LayoutEdge>> {
    let mut lines = Vec::with_capacity(edges.len());
    for edge in edges {
        let (Some(source_level), Some(target_level)) =
            (tree.level(&edge.from_id), tree.level(&edge.to_id))
        else {
            warn!(
                id = edge.id.as_str(),
                from = edge.from_id.as_str(),
                to = edge.to_id.as_str(),
                "skipping relationship line with an endpoint outside the tree"
            );
            continue;
        };

        if source_level == target_level {
            let Some(order) = tree.compare_vertical_position(&edge.from_id, &edge.to_id)? else {
                continue;
            };
            lines.push(same_level_line(&edge.id, &edge.from_id, &edge.to_id, order, config));
            continue;
        }

        let source_is_left = if source_level < target_level { 1 } else { -1 };
        let s = source_is_left * direction.sign();
        lines.push(cross_level_line(&edge.id, &edge.from_id, &edge.to_id, s, config));
    }
    Ok(lines)
}

/// Lines for links between two trees, whose side is already known.
pub fn layout_cross_tree_lines(edges: &[CrossTreeEdge], config: &LayoutConfig) -> Vec<LayoutEdge> {
    edges
        .iter()
        .map(|edge| cross_level_line(&edge.id, &edge.from_id, &edge.to_id, edge.right, config))
        .collect()
}
