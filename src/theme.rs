use serde::{Deserialize, Serialize};

/// Style block written into every layout document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub color_theme: String,
    pub struct_theme: String,
    pub can_line_wrap: bool,
    pub broadcast_margins: bool,
    pub avoid_overlay: bool,
}

impl Theme {
    pub fn gitmind_default() -> Self {
        Self {
            color_theme: "rainbow-yellow".to_string(),
            struct_theme: "mind-arc".to_string(),
            can_line_wrap: true,
            broadcast_margins: false,
            avoid_overlay: false,
        }
    }

    /// Same palette, but spread margins and avoid overlapping branches.
    /// Useful for wide fusion maps.
    pub fn spacious() -> Self {
        Self {
            broadcast_margins: true,
            avoid_overlay: true,
            ..Self::gitmind_default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gitmind_default()
    }
}
