use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Editor defaults supplied by the host page
///
/// Every field is optional in JSON; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Maximum undo levels (0 = unlimited)
    pub history_limit: usize,

    /// Font family given to new elements until the user picks another
    pub default_font: String,

    /// Color given to new text elements
    pub default_text_color: String,

    /// Background of newly created cards
    pub default_background: String,

    /// Position of new elements without an explicit position
    pub default_x: f64,
    pub default_y: f64,

    pub emoji_font_size: f64,
    pub text_font_size: f64,

    /// Offset applied to both axes when duplicating an element
    pub duplicate_offset: f64,

    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,

    /// Fixed id seed (tests, reproducible sessions). Random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            default_font: "Inter".to_string(),
            default_text_color: "#000000".to_string(),
            default_background: cardstudio_model::DEFAULT_BACKGROUND.to_string(),
            default_x: 100.0,
            default_y: 100.0,
            emoji_font_size: 64.0,
            text_font_size: 24.0,
            duplicate_offset: 20.0,
            default_zoom: 1.0,
            min_zoom: 0.25,
            max_zoom: 3.0,
            id_seed: None,
        }
    }
}

impl EditorConfig {
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Config with a fixed id seed
    pub fn seeded(seed: impl Into<String>) -> Self {
        Self {
            id_seed: Some(seed.into()),
            ..Self::default()
        }
    }

    pub(crate) fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
