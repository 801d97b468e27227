//! # Elements
//!
//! A single placed visual item on one face of a card.
//!
//! All element types share geometry (`x`, `y`, optional size, rotation) and
//! the owning face. Type-specific fields such as `shapeType` or
//! `mixBlendMode` are optional and only meaningful for some types. Keys the
//! model does not know about are kept in `extra` so imported documents
//! export unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of visual item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Emoji,
    Image,
    Draw,
    Line,
    Shape,
}

impl ElementType {
    /// Types that carry font size and family
    pub fn is_typographic(self) -> bool {
        matches!(self, ElementType::Text | ElementType::Emoji)
    }

    /// Images are always painted beneath every other element type
    pub fn paints_below(self) -> bool {
        matches!(self, ElementType::Image)
    }
}

/// One of the four printable sides of a card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Face {
    #[default]
    Front,
    InsideLeft,
    InsideRight,
    Back,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Front, Face::InsideLeft, Face::InsideRight, Face::Back];
}

/// Placed visual item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Text, emoji glyph, image URL/data or path data depending on type
    #[serde(default)]
    pub content: String,

    /// Top-left corner in unscaled design-space pixels
    pub x: f64,
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Degrees, clockwise
    #[serde(default)]
    pub rotation: f64,

    #[serde(default)]
    pub face: Face,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_blend_mode: Option<String>,

    /// Unrecognized type-specific keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Element {
    /// Bare element at the origin of the given face
    pub fn new(id: impl Into<String>, element_type: ElementType, content: impl Into<String>, face: Face) -> Self {
        Self {
            id: id.into(),
            element_type,
            content: content.into(),
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            color: None,
            font_size: None,
            font_family: None,
            rotation: 0.0,
            face,
            shape_type: None,
            line_style: None,
            filter: None,
            mix_blend_mode: None,
            extra: Map::new(),
        }
    }

    /// Merge a partial update into this element. The id is never touched.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = Some(width);
        }
        if let Some(height) = patch.height {
            self.height = Some(height);
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = Some(font_size);
        }
        if let Some(font_family) = &patch.font_family {
            self.font_family = Some(font_family.clone());
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(face) = patch.face {
            self.face = face;
        }
        if let Some(shape_type) = &patch.shape_type {
            self.shape_type = Some(shape_type.clone());
        }
        if let Some(line_style) = &patch.line_style {
            self.line_style = Some(line_style.clone());
        }
        if let Some(filter) = &patch.filter {
            self.filter = Some(filter.clone());
        }
        if let Some(mix_blend_mode) = &patch.mix_blend_mode {
            self.mix_blend_mode = Some(mix_blend_mode.clone());
        }
        for (key, value) in &patch.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Partial element update
///
/// Used both for `updateElement` merges and as style overrides when adding
/// an element. Absent fields leave the element unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face: Option<Face>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mix_blend_mode: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch carrying every geometry and style field of `element`
    /// (everything except id, type and content)
    pub fn copy_style(element: &Element) -> Self {
        Self {
            content: None,
            x: Some(element.x),
            y: Some(element.y),
            width: element.width,
            height: element.height,
            color: element.color.clone(),
            font_size: element.font_size,
            font_family: element.font_family.clone(),
            rotation: Some(element.rotation),
            face: Some(element.face),
            shape_type: element.shape_type.clone(),
            line_style: element.line_style.clone(),
            filter: element.filter.clone(),
            mix_blend_mode: element.mix_blend_mode.clone(),
            extra: element.extra.clone(),
        }
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn face(mut self, face: Face) -> Self {
        self.face = Some(face);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_json_layout() {
        let mut element = Element::new("e-1", ElementType::Text, "Hi", Face::InsideRight);
        element.x = 100.0;
        element.y = 120.0;
        element.font_size = Some(24.0);

        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["face"], "inside-right");
        assert_eq!(json["fontSize"], 24.0);
        assert_eq!(json["rotation"], 0.0);
        assert!(json.get("width").is_none());
        assert!(json.get("mixBlendMode").is_none());
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let source = r#"{
            "id": "e-7",
            "type": "draw",
            "content": "M0 0 L10 10",
            "x": 5,
            "y": 6,
            "rotation": 0,
            "face": "back",
            "mixBlendMode": "multiply",
            "strokeWidth": 4
        }"#;

        let element: Element = serde_json::from_str(source).unwrap();
        assert_eq!(element.mix_blend_mode.as_deref(), Some("multiply"));
        assert_eq!(element.extra["strokeWidth"], 4);

        let back = serde_json::to_value(&element).unwrap();
        assert_eq!(back["strokeWidth"], 4);
        assert_eq!(back["face"], "back");
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut element = Element::new("e-1", ElementType::Shape, "", Face::Front);
        element.color = Some("#ff0000".to_string());

        let patch = ElementPatch::new().position(40.0, 50.0).rotation(15.0);
        element.apply_patch(&patch);

        assert_eq!(element.id, "e-1");
        assert_eq!((element.x, element.y), (40.0, 50.0));
        assert_eq!(element.rotation, 15.0);
        assert_eq!(element.color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_patch_deserializes_from_partial_json() {
        let patch: ElementPatch = serde_json::from_str(r#"{"x": 3, "fontFamily": "Lobster"}"#).unwrap();
        assert_eq!(patch.x, Some(3.0));
        assert_eq!(patch.font_family.as_deref(), Some("Lobster"));
        assert!(patch.y.is_none());
        assert!(!patch.is_empty());
        assert!(ElementPatch::new().is_empty());
    }
}
