//! # Projects
//!
//! One document: an ordered list of cards, a layout mode and a persistence
//! identity.
//!
//! Persisted layout:
//!
//! ```text
//! { "id": null | "local_…" | "<server id>",
//!   "name": "...",
//!   "cards": [Card, ...],
//!   "cardMode": "foldable" | "envelope" | "postcard",
//!   "updatedAt": <epoch ms> | null }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::card::Card;
use crate::element::Element;

/// Prefix marking ids that only exist in local browser storage
pub const LOCAL_ID_PREFIX: &str = "local_";

/// Physical layout of the cards in a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardMode {
    #[default]
    Foldable,
    Envelope,
    Postcard,
}

/// Where (if anywhere) a project has been saved
///
/// Stored on disk as the single nullable `id` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectIdentity {
    #[default]
    Unsaved,
    LocalOnly(String),
    CloudLinked(String),
}

impl ProjectIdentity {
    /// Local identity for a generated id, adding the local prefix if needed
    pub fn local(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.starts_with(LOCAL_ID_PREFIX) {
            ProjectIdentity::LocalOnly(id)
        } else {
            ProjectIdentity::LocalOnly(format!("{}{}", LOCAL_ID_PREFIX, id))
        }
    }

    pub fn from_id(id: Option<String>) -> Self {
        match id {
            None => ProjectIdentity::Unsaved,
            Some(id) if id.starts_with(LOCAL_ID_PREFIX) => ProjectIdentity::LocalOnly(id),
            Some(id) => ProjectIdentity::CloudLinked(id),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ProjectIdentity::Unsaved => None,
            ProjectIdentity::LocalOnly(id) | ProjectIdentity::CloudLinked(id) => Some(id),
        }
    }

    pub fn is_saved(&self) -> bool {
        !matches!(self, ProjectIdentity::Unsaved)
    }
}

impl Serialize for ProjectIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProjectIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(ProjectIdentity::from_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "id", default)]
    pub identity: ProjectIdentity,

    #[serde(default)]
    pub name: String,

    pub cards: Vec<Card>,

    pub card_mode: CardMode,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Unsaved, unnamed project holding a single card
    pub fn new(card: Card) -> Self {
        Self {
            identity: ProjectIdentity::Unsaved,
            name: String::new(),
            cards: vec![card],
            card_mode: CardMode::default(),
            updated_at: None,
        }
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn card_index(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Card that owns the element with `element_id`
    pub fn owner_of(&self, element_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.contains_element(element_id))
    }

    /// Element anywhere in the project
    pub fn element(&self, element_id: &str) -> Option<&Element> {
        self.cards.iter().find_map(|c| c.element(element_id))
    }

    pub fn element_mut(&mut self, element_id: &str) -> Option<&mut Element> {
        self.cards.iter_mut().find_map(|c| c.element_mut(element_id))
    }

    /// Whether any card or element already uses `id`
    pub fn uses_id(&self, id: &str) -> bool {
        self.cards.iter().any(|c| c.id == id || c.contains_element(id))
    }
}
