use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(rename = "text-underline")]
    pub text_underline: bool,
    #[serde(rename = "text-line-through")]
    pub text_line_through: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(rename = "text-underline")]
    pub text_underline: bool,
    #[serde(rename = "text-line-through")]
    pub text_line_through: bool,
    #[serde(rename = "line-type")]
    pub line_type: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            text_underline: false,
            text_line_through: false,
            line_type: "line".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    pub expanded: bool,
    pub text: String,
    pub html: String,
    /// How many of the root's children fan out to the right.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mind_layout_split_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_snippet: Option<String>,
    /// Absolute placement, only set on floating roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

/// One node of the drawn mind map with its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub data: NodeData,
    pub style: NodeStyle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutRecord>,
}

impl Drop for LayoutRecord {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut record) = pending.pop() {
            pending.append(&mut record.children);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineData {
    pub id: String,
    pub from_id: String,
    pub from_angle: i32,
    pub to_id: String,
    pub to_angle: i32,
    pub relative_control1: Point,
    pub relative_control2: Point,
    pub text: String,
    pub html: String,
}

/// A relationship line drawn outside the tree structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub data: LineData,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindmapLayout {
    pub root: LayoutRecord,
    pub lines: Vec<LayoutEdge>,
}
