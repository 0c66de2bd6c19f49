use tracing::warn;

use super::types::{LayoutRecord, NodeData, NodeStyle};
use crate::ir::{Direction, TreeDocument};
use crate::tree::Tree;

pub(super) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn node_data(
    id: &str,
    text: &str,
    level: usize,
    child_count: usize,
    direction: Direction,
) -> NodeData {
    let mut data = NodeData {
        id: id.to_string(),
        expanded: true,
        text: text.to_string(),
        html: format!("<p>{}</p>", escape_html(text)),
        mind_layout_split_index: None,
        time_snippet: None,
        position: None,
    };
    match level {
        1 => {
            data.mind_layout_split_index = Some(match direction {
                Direction::Right => child_count,
                Direction::Left => 0,
            });
        }
        2 => data.time_snippet = Some(String::new()),
        _ => {}
    }
    data
}

/// Mirrors the tree as nested node records. Children are assembled before
/// their parents by scanning the arena backwards, so depth is not bounded by
/// the call stack.
pub(super) fn layout_nodes(
    doc: &TreeDocument,
    tree: &Tree,
    direction: Direction,
) -> LayoutRecord {
    let labels = doc.labels();
    let mut built: Vec<Option<LayoutRecord>> = vec![None; tree.len()];
    for slot in (0..tree.len()).rev() {
        let id = tree.slot_id(slot);
        let text = match labels.get(id) {
            Some(text) => *text,
            None => {
                warn!(id, "tree node has no label entry");
                id
            }
        };
        let child_slots = tree.slot_children(slot);
        let data = node_data(id, text, tree.slot_level(slot), child_slots.len(), direction);
        let children = child_slots
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[slot] = Some(LayoutRecord {
            data,
            style: NodeStyle::default(),
            children,
        });
    }
    built
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| LayoutRecord {
            data: node_data(tree.root_id(), "", 1, 0, direction),
            style: NodeStyle::default(),
            children: Vec::new(),
        })
}
