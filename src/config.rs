use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Label given to a synthesized root when no name is derived from input.
    pub default_root_label: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_root_label: "root".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical control-point offset for edges between nodes on one level.
    pub same_level_offset: i32,
    /// Horizontal control-point offset for edges that cross levels.
    pub cross_level_offset: i32,
    pub float_root_offset_x: i32,
    pub float_root_offset_y: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            same_level_offset: 12,
            cross_level_offset: 75,
            float_root_offset_x: 2000,
            float_root_offset_y: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub version: String,
    pub show_watermark: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            version: "2.1.3".to_string(),
            show_watermark: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub tree: TreeConfig,
    pub layout: LayoutConfig,
    pub document: DocumentConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    color_theme: Option<String>,
    struct_theme: Option<String>,
    can_line_wrap: Option<bool>,
    broadcast_margins: Option<bool>,
    avoid_overlay: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeConfigFile {
    default_root_label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    same_level_offset: Option<i32>,
    cross_level_offset: Option<i32>,
    float_root_offset_x: Option<i32>,
    float_root_offset_y: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentConfigFile {
    version: Option<String>,
    show_watermark: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    tree: Option<TreeConfigFile>,
    layout: Option<LayoutConfigFile>,
    document: Option<DocumentConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(config, &contents)
}

fn parse_config(mut config: Config, contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "spacious" {
            config.theme = Theme::spacious();
        } else if theme_name == "default" || theme_name == "gitmind" {
            config.theme = Theme::gitmind_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.color_theme {
            config.theme.color_theme = v;
        }
        if let Some(v) = vars.struct_theme {
            config.theme.struct_theme = v;
        }
        if let Some(v) = vars.can_line_wrap {
            config.theme.can_line_wrap = v;
        }
        if let Some(v) = vars.broadcast_margins {
            config.theme.broadcast_margins = v;
        }
        if let Some(v) = vars.avoid_overlay {
            config.theme.avoid_overlay = v;
        }
    }

    if let Some(tree) = parsed.tree
        && let Some(v) = tree.default_root_label
    {
        config.tree.default_root_label = v;
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.same_level_offset {
            config.layout.same_level_offset = v;
        }
        if let Some(v) = layout.cross_level_offset {
            config.layout.cross_level_offset = v;
        }
        if let Some(v) = layout.float_root_offset_x {
            config.layout.float_root_offset_x = v;
        }
        if let Some(v) = layout.float_root_offset_y {
            config.layout.float_root_offset_y = v;
        }
    }

    if let Some(document) = parsed.document {
        if let Some(v) = document.version {
            config.document.version = v;
        }
        if let Some(v) = document.show_watermark {
            config.document.show_watermark = v;
        }
    }

    Ok(config)
}
