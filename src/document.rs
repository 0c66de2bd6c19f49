//! GitMind content document: layout records wrapped in container metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{Config, LayoutConfig};
use crate::error::Result;
use crate::id::IdAllocator;
use crate::ir::{CrossTreeEdge, Direction, TreeDocument};
use crate::layout::{
    LayoutEdge, LayoutRecord, MindmapLayout, Point, compute_layout, layout_cross_tree_lines,
};
use crate::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStyle {
    #[serde(rename = "can-line-wrap")]
    pub can_line_wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStyle {
    #[serde(rename = "broadcast-margins")]
    pub broadcast_margins: bool,
    #[serde(rename = "avoid-overlay")]
    pub avoid_overlay: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeStyle {
    pub color_theme: String,
    pub struct_theme: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStyle {
    pub content: ContentStyle,
    pub layout: LayoutStyle,
    pub theme: ThemeStyle,
}

impl From<&Theme> for DocumentStyle {
    fn from(theme: &Theme) -> Self {
        Self {
            content: ContentStyle {
                can_line_wrap: theme.can_line_wrap,
            },
            layout: LayoutStyle {
                broadcast_margins: theme.broadcast_margins,
                avoid_overlay: theme.avoid_overlay,
            },
            theme: ThemeStyle {
                color_theme: theme.color_theme.clone(),
                struct_theme: theme.struct_theme.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub id: String,
    pub show: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitMindDocument {
    pub id: String,
    pub created: i64,
    pub modified: i64,
    pub auto_increment_id: u64,
    pub version: String,
    pub style: DocumentStyle,
    pub root: LayoutRecord,
    pub float_roots: Vec<LayoutRecord>,
    pub rel_lines: Vec<LayoutEdge>,
    pub watermark: Watermark,
}

/// Caller-supplied identity of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl DocumentMeta {
    pub fn generate(ids: &mut IdAllocator) -> Self {
        Self {
            id: ids.document_id(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

pub fn build_document(
    layout: MindmapLayout,
    meta: DocumentMeta,
    config: &Config,
) -> GitMindDocument {
    GitMindDocument {
        id: meta.id.clone(),
        created: meta.timestamp,
        modified: meta.timestamp,
        auto_increment_id: 0,
        version: config.document.version.clone(),
        style: DocumentStyle::from(&config.theme),
        root: layout.root,
        float_roots: Vec::new(),
        rel_lines: layout.lines,
        watermark: Watermark {
            id: meta.id,
            show: config.document.show_watermark,
        },
    }
}

pub fn convert_tree(
    doc: &TreeDocument,
    direction: Direction,
    meta: DocumentMeta,
    config: &Config,
) -> Result<GitMindDocument> {
    let layout = compute_layout(doc, direction, &config.layout)?;
    Ok(build_document(layout, meta, config))
}

/// Places `secondary`'s root beside `primary` as a floating root and merges
/// all relationship lines, followed by the cross-tree links.
pub fn compose_documents(
    mut primary: GitMindDocument,
    secondary: GitMindDocument,
    cross_edges: &[CrossTreeEdge],
    config: &LayoutConfig,
) -> GitMindDocument {
    let mut floating = secondary.root;
    floating.data.position = Some(Point::new(
        config.float_root_offset_x,
        config.float_root_offset_y,
    ));
    primary.float_roots.push(floating);
    primary.rel_lines.extend(secondary.rel_lines);
    primary
        .rel_lines
        .extend(layout_cross_tree_lines(cross_edges, config));
    primary
}

/// Lays out both trees (primary fanning right, secondary left) and composes
/// them into one document.
pub fn convert_fused(
    primary: &TreeDocument,
    secondary: &TreeDocument,
    cross_edges: &[CrossTreeEdge],
    meta: DocumentMeta,
    config: &Config,
) -> Result<GitMindDocument> {
    let left = convert_tree(primary, Direction::Right, meta.clone(), config)?;
    let right = convert_tree(secondary, Direction::Left, meta, config)?;
    Ok(compose_documents(left, right, cross_edges, &config.layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::generate_fused_trees;
    use crate::ir::DependencyEdge;
    use crate::tree::generate_tree;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            id: "doc".to_string(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn document_carries_metadata() {
        let mut ids = IdAllocator::with_seed(8);
        let doc = generate_tree(&[DependencyEdge::new("a", "b")], "root", &mut ids).unwrap();
        let gitmind = convert_tree(&doc, Direction::Right, meta(), &Config::default()).unwrap();
        let value = serde_json::to_value(&gitmind).unwrap();
        assert_eq!(value["id"], "doc");
        assert_eq!(value["created"], 1_700_000_000_000_i64);
        assert_eq!(value["modified"], value["created"]);
        assert_eq!(value["autoIncrementId"], 0);
        assert_eq!(value["version"], "2.1.3");
        assert_eq!(value["style"]["content"]["can-line-wrap"], true);
        assert_eq!(value["style"]["layout"]["avoid-overlay"], false);
        assert_eq!(value["style"]["theme"]["colorTheme"], "rainbow-yellow");
        assert_eq!(value["style"]["theme"]["structTheme"], "mind-arc");
        assert_eq!(value["floatRoots"], serde_json::json!([]));
        assert_eq!(value["relLines"], serde_json::json!([]));
        assert_eq!(value["watermark"]["id"], "doc");
        assert_eq!(value["watermark"]["show"], false);
        assert_eq!(value["root"]["data"]["text"], "a");
    }

    #[test]
    fn generated_meta_uses_current_time() {
        let mut ids = IdAllocator::with_seed(1);
        let before = Utc::now().timestamp_millis();
        let meta = DocumentMeta::generate(&mut ids);
        assert!(meta.timestamp >= before);
        assert_eq!(meta.id.len(), 32);
    }

    #[test]
    fn composition_floats_second_root() {
        let mut ids = IdAllocator::with_seed(13);
        let trees = generate_fused_trees(
            (
                &[
                    DependencyEdge::new("ml", "trees"),
                    DependencyEdge::new("ml", "forest"),
                    DependencyEdge::new("trees", "forest"),
                ],
                "ml",
            ),
            (&[DependencyEdge::new("stats", "variance")], "stats"),
            &[
                DependencyEdge::new("trees", "variance"),
                DependencyEdge::new("variance", "forest"),
            ],
            &mut ids,
        )
        .unwrap();
        let config = Config::default();
        let composed = convert_fused(
            &trees.primary,
            &trees.secondary,
            &trees.cross_edges,
            meta(),
            &config,
        )
        .unwrap();

        assert_eq!(composed.root.data.text, "ml");
        assert_eq!(composed.root.data.mind_layout_split_index, Some(2));
        assert_eq!(composed.float_roots.len(), 1);
        let floating = &composed.float_roots[0];
        assert_eq!(floating.data.text, "stats");
        assert_eq!(floating.data.position, Some(Point::new(2000, 0)));
        assert_eq!(floating.data.mind_layout_split_index, Some(0));

        // One same-level line from the primary tree, then two cross-tree links.
        assert_eq!(composed.rel_lines.len(), 3);
        let to_secondary = &composed.rel_lines[1].data;
        assert_eq!((to_secondary.from_angle, to_secondary.to_angle), (0, 180));
        let to_primary = &composed.rel_lines[2].data;
        assert_eq!((to_primary.from_angle, to_primary.to_angle), (180, 0));
    }
}
