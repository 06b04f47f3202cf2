//! Colors used by the renderer.

use serde::{Deserialize, Serialize};

/// Fill of the node currently being visited by the animator.
pub const HIGHLIGHT_FILL: &str = "#4CAF50";
/// Fill of nodes already visited.
pub const VISITED_FILL: &str = "#f44336";
pub const EDGE_COLOR: &str = "#666";
pub const PLACEHOLDER_EDGE_COLOR: &str = "#ccc";
pub const PLACEHOLDER_FILL: &str = "#f0f0f0";
pub const PLACEHOLDER_STROKE: &str = "#667eea";
pub const DELETE_BUTTON_FILL: &str = "#dc3545";
pub const ADD_BUTTON_FILL: &str = "#28a745";
pub const BUTTON_GLYPH: &str = "#fff";

/// User-adjustable node colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub node_fill: String,
    pub node_stroke: String,
    pub node_text: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            node_fill: "#2196F3".to_string(),
            node_stroke: "#1976D2".to_string(),
            node_text: "#ffffff".to_string(),
        }
    }
}

impl ColorScheme {
    /// Returns the first entry that is not a `#rgb` or `#rrggbb` color.
    pub fn invalid_entry(&self) -> Option<(&'static str, &str)> {
        [
            ("node_fill", self.node_fill.as_str()),
            ("node_stroke", self.node_stroke.as_str()),
            ("node_text", self.node_text.as_str()),
        ]
        .into_iter()
        .find(|(_, value)| !is_hex_color(value))
    }
}

pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#fff", true)]
    #[case("#2196F3", true)]
    #[case("2196F3", false)]
    #[case("#12345", false)]
    #[case("#ggg", false)]
    fn test_is_hex_color(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_hex_color(value), expected);
    }

    #[test]
    fn given_bad_stroke_when_validating_then_names_field() {
        let colors = ColorScheme {
            node_stroke: "blue".to_string(),
            ..ColorScheme::default()
        };
        assert_eq!(colors.invalid_entry(), Some(("node_stroke", "blue")));
        assert_eq!(ColorScheme::default().invalid_entry(), None);
    }
}
