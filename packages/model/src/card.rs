//! # Cards
//!
//! One physical card: a list of elements partitioned by face, a background
//! shared by every face, and optional celebration/audio attachments.
//!
//! The element list order is the paint order within a face, except that
//! images are always painted underneath everything else.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Face};

pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Animation played when the card is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Celebration {
    None,
    Confetti,
    Fireworks,
    FloatingEmoji,
}

/// Z-order movement within a card's element list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZOrder {
    Forward,
    Backward,
    ToFront,
    ToBack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,

    #[serde(default)]
    pub elements: Vec<Element>,

    pub background_color: String,

    /// Face shown in the editor; view state only
    #[serde(default)]
    pub current_face: Face,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebration: Option<Celebration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebration_emoji: Option<String>,

    /// Opaque to the model (base64 payload or URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_src: Option<String>,
}

impl Card {
    /// Empty card showing its front face
    pub fn new(id: impl Into<String>, background_color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
            background_color: background_color.into(),
            current_face: Face::Front,
            celebration: None,
            celebration_emoji: None,
            audio_src: None,
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn contains_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Remove an element, returning it if it was present
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Elements drawn on `face`, in list order
    pub fn elements_on(&self, face: Face) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.face == face)
    }

    /// Elements of `face` bottom-most first: images, then everything else
    pub fn paint_order(&self, face: Face) -> Vec<&Element> {
        let (mut below, above): (Vec<&Element>, Vec<&Element>) = self
            .elements_on(face)
            .partition(|e| e.element_type.paints_below());
        below.extend(above);
        below
    }

    /// Current and target list positions for a z-order move, or `None` if
    /// the element is missing or already at the requested end
    pub fn reorder_target(&self, id: &str, order: ZOrder) -> Option<(usize, usize)> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        let last = self.elements.len() - 1;

        let target = match order {
            ZOrder::Forward => (pos + 1).min(last),
            ZOrder::Backward => pos.saturating_sub(1),
            ZOrder::ToFront => last,
            ZOrder::ToBack => 0,
        };

        (target != pos).then_some((pos, target))
    }

    /// Move an element within the list. Returns false if nothing moved.
    pub fn reorder_element(&mut self, id: &str, order: ZOrder) -> bool {
        let Some((pos, target)) = self.reorder_target(id, order) else {
            return false;
        };
        let element = self.elements.remove(pos);
        self.elements.insert(target, element);
        true
    }

    /// Deep copy with a fresh card id and a fresh id for every element
    pub fn deep_copy(&self, mut next_id: impl FnMut() -> String) -> Card {
        let mut copy = self.clone();
        copy.id = next_id();
        for element in &mut copy.elements {
            element.id = next_id();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::id_generator::IdGenerator;

    fn card_with(types: &[(&str, ElementType, Face)]) -> Card {
        let mut card = Card::new("c1", DEFAULT_BACKGROUND);
        for (id, element_type, face) in types {
            card.elements.push(Element::new(*id, *element_type, "", *face));
        }
        card
    }

    #[test]
    fn test_paint_order_puts_images_below() {
        let card = card_with(&[
            ("t1", ElementType::Text, Face::Front),
            ("i1", ElementType::Image, Face::Front),
            ("s1", ElementType::Shape, Face::Front),
            ("i2", ElementType::Image, Face::Front),
            ("b1", ElementType::Text, Face::Back),
        ]);

        let order: Vec<&str> = card.paint_order(Face::Front).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["i1", "i2", "t1", "s1"]);
    }

    #[test]
    fn test_reorder_element() {
        let mut card = card_with(&[
            ("a", ElementType::Text, Face::Front),
            ("b", ElementType::Text, Face::Front),
            ("c", ElementType::Text, Face::Front),
        ]);

        assert!(card.reorder_element("a", ZOrder::ToFront));
        let ids: Vec<&str> = card.elements.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        assert!(!card.reorder_element("a", ZOrder::Forward));
        assert!(card.reorder_element("a", ZOrder::Backward));
        assert!(!card.reorder_element("missing", ZOrder::ToBack));
    }

    #[test]
    fn test_deep_copy_assigns_fresh_ids() {
        let card = card_with(&[
            ("a", ElementType::Emoji, Face::Front),
            ("b", ElementType::Line, Face::Back),
        ]);
        let mut ids = IdGenerator::from_seed("copy");

        let copy = card.deep_copy(|| ids.new_id());

        assert_ne!(copy.id, card.id);
        assert_eq!(copy.elements.len(), 2);
        for (original, copied) in card.elements.iter().zip(&copy.elements) {
            assert_ne!(original.id, copied.id);
            assert_eq!(original.face, copied.face);
            assert_eq!(original.element_type, copied.element_type);
        }
    }

    #[test]
    fn test_card_json_layout() {
        let mut card = Card::new("c1", "#fafafa");
        card.celebration = Some(Celebration::FloatingEmoji);
        card.celebration_emoji = Some("🎉".to_string());

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["backgroundColor"], "#fafafa");
        assert_eq!(json["currentFace"], "front");
        assert_eq!(json["celebration"], "floating-emoji");
        assert!(json.get("audioSrc").is_none());
        assert_eq!(json["elements"].as_array().map(Vec::len), Some(0));
    }
}
