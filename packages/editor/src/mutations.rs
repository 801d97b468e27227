//! # Card Mutations
//!
//! Every write to a project goes through one `Mutation` value.
//!
//! ## History classification
//!
//! Whether a mutation is undoable is decided in one place,
//! [`Mutation::kind`], never at call sites:
//!
//! | Kind         | Mutations                                                     | Undoable |
//! |--------------|---------------------------------------------------------------|----------|
//! | `Structural` | add/remove element, reorder, add/remove/duplicate card, background | yes |
//! | `Continuous` | update element (drag, resize, restyle)                        | no       |
//! | `ViewOnly`   | set card face                                                 | no       |
//! | `Metadata`   | celebration, audio, card mode, project name                   | no       |
//!
//! Continuous updates arrive dozens of times per gesture; collaborators
//! that want one undo step per gesture wrap them in
//! `begin_gesture`/`end_gesture`.
//!
//! ## No-op semantics
//!
//! A mutation whose target does not exist is validated away before
//! anything happens: no state change, no history entry. The returned
//! [`MutationError`] only says why nothing happened; ids legitimately go
//! stale across async boundaries, so callers usually ignore it.

use cardstudio_model::{Card, Celebration, CardMode, ElementPatch, ElementType, Face, Project, ZOrder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations on the live project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new element to the active card
    AddElement {
        element_type: ElementType,
        content: String,
        overrides: ElementPatch,
    },

    /// Merge a partial update into an element on any card
    UpdateElement {
        element_id: String,
        patch: ElementPatch,
    },

    RemoveElement {
        element_id: String,
    },

    /// Change an element's z-order within its card
    ReorderElement {
        element_id: String,
        order: ZOrder,
    },

    /// Append an empty card and make it active
    AddCard,

    RemoveCard {
        card_id: String,
    },

    /// Insert a deep copy right after the original and make it active
    DuplicateCard {
        card_id: String,
    },

    SetCardFace {
        card_id: String,
        face: Face,
    },

    /// Background of the active card
    SetBackgroundColor {
        color: String,
    },

    SetCelebration {
        card_id: String,
        celebration: Celebration,
        emoji: Option<String>,
    },

    SetAudio {
        card_id: String,
        src: Option<String>,
    },

    SetCardMode {
        mode: CardMode,
    },

    RenameProject {
        name: String,
    },
}

/// How a mutation relates to undo history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    /// Content edit, one undo step each
    Structural,
    /// Gesture-driven update, not recorded
    Continuous,
    /// Navigation state, not recorded
    ViewOnly,
    /// Attachments and project-level fields, not recorded
    Metadata,
}

impl MutationKind {
    pub fn records_history(self) -> bool {
        matches!(self, MutationKind::Structural)
    }
}

/// Why a mutation was skipped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("No active card")]
    NoActiveCard,

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element already in requested position: {0}")]
    AlreadyInPosition(String),
}

/// What an applied mutation did
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub kind: MutationKind,

    /// Id of the element or card the mutation created, if any
    pub created_id: Option<String>,

    /// Whether a history snapshot was pushed before applying
    pub recorded_history: bool,
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::AddElement { .. }
            | Mutation::RemoveElement { .. }
            | Mutation::ReorderElement { .. }
            | Mutation::AddCard
            | Mutation::RemoveCard { .. }
            | Mutation::DuplicateCard { .. }
            | Mutation::SetBackgroundColor { .. } => MutationKind::Structural,

            Mutation::UpdateElement { .. } => MutationKind::Continuous,

            Mutation::SetCardFace { .. } => MutationKind::ViewOnly,

            Mutation::SetCelebration { .. }
            | Mutation::SetAudio { .. }
            | Mutation::SetCardMode { .. }
            | Mutation::RenameProject { .. } => MutationKind::Metadata,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "add_element",
            Mutation::UpdateElement { .. } => "update_element",
            Mutation::RemoveElement { .. } => "remove_element",
            Mutation::ReorderElement { .. } => "reorder_element",
            Mutation::AddCard => "add_card",
            Mutation::RemoveCard { .. } => "remove_card",
            Mutation::DuplicateCard { .. } => "duplicate_card",
            Mutation::SetCardFace { .. } => "set_card_face",
            Mutation::SetBackgroundColor { .. } => "set_background_color",
            Mutation::SetCelebration { .. } => "set_celebration",
            Mutation::SetAudio { .. } => "set_audio",
            Mutation::SetCardMode { .. } => "set_card_mode",
            Mutation::RenameProject { .. } => "rename_project",
        }
    }

    /// Validate against the state at call time without applying
    pub fn validate(&self, project: &Project, active_card_id: Option<&str>) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement { .. } | Mutation::SetBackgroundColor { .. } => {
                active_card(project, active_card_id).ok_or(MutationError::NoActiveCard)?;
                Ok(())
            }

            Mutation::UpdateElement { element_id, .. } | Mutation::RemoveElement { element_id } => {
                project
                    .element(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                Ok(())
            }

            Mutation::ReorderElement { element_id, order } => {
                let owner = project
                    .owner_of(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                owner
                    .reorder_target(element_id, *order)
                    .ok_or_else(|| MutationError::AlreadyInPosition(element_id.clone()))?;
                Ok(())
            }

            Mutation::RemoveCard { card_id }
            | Mutation::DuplicateCard { card_id }
            | Mutation::SetCardFace { card_id, .. }
            | Mutation::SetCelebration { card_id, .. }
            | Mutation::SetAudio { card_id, .. } => {
                project
                    .card(card_id)
                    .ok_or_else(|| MutationError::CardNotFound(card_id.clone()))?;
                Ok(())
            }

            Mutation::AddCard | Mutation::SetCardMode { .. } | Mutation::RenameProject { .. } => Ok(()),
        }
    }
}

/// Active card, if the pointer is set and still names a card
pub(crate) fn active_card<'a>(project: &'a Project, active_card_id: Option<&str>) -> Option<&'a Card> {
    active_card_id.and_then(|id| project.card(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstudio_model::{Element, DEFAULT_BACKGROUND};

    fn project() -> Project {
        let mut card = Card::new("c1", DEFAULT_BACKGROUND);
        card.elements.push(Element::new("e1", ElementType::Text, "Hi", Face::Front));
        card.elements.push(Element::new("e2", ElementType::Emoji, "🎂", Face::Front));
        Project::new(card)
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateElement {
            element_id: "e1".to_string(),
            patch: ElementPatch::new().position(10.0, 20.0),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_only_structural_mutations_record_history() {
        let structural = Mutation::RemoveCard { card_id: "c1".to_string() };
        let continuous = Mutation::UpdateElement {
            element_id: "e1".to_string(),
            patch: ElementPatch::new(),
        };
        let view = Mutation::SetCardFace {
            card_id: "c1".to_string(),
            face: Face::Back,
        };
        let metadata = Mutation::SetAudio {
            card_id: "c1".to_string(),
            src: None,
        };

        assert!(structural.kind().records_history());
        assert!(!continuous.kind().records_history());
        assert_eq!(view.kind(), MutationKind::ViewOnly);
        assert_eq!(metadata.kind(), MutationKind::Metadata);
        assert_eq!(Mutation::AddCard.kind(), MutationKind::Structural);
    }

    #[test]
    fn test_validation_reports_missing_targets() {
        let project = project();

        let add = Mutation::AddElement {
            element_type: ElementType::Text,
            content: "x".to_string(),
            overrides: ElementPatch::new(),
        };
        assert_eq!(add.validate(&project, None), Err(MutationError::NoActiveCard));
        assert_eq!(add.validate(&project, Some("gone")), Err(MutationError::NoActiveCard));
        assert!(add.validate(&project, Some("c1")).is_ok());

        let remove = Mutation::RemoveElement {
            element_id: "nope".to_string(),
        };
        assert_eq!(
            remove.validate(&project, Some("c1")),
            Err(MutationError::ElementNotFound("nope".to_string()))
        );

        let face = Mutation::SetCardFace {
            card_id: "c9".to_string(),
            face: Face::Back,
        };
        assert_eq!(
            face.validate(&project, Some("c1")),
            Err(MutationError::CardNotFound("c9".to_string()))
        );
    }

    #[test]
    fn test_reorder_at_end_is_skipped() {
        let project = project();
        let to_front = Mutation::ReorderElement {
            element_id: "e2".to_string(),
            order: ZOrder::ToFront,
        };
        let to_back = Mutation::ReorderElement {
            element_id: "e2".to_string(),
            order: ZOrder::ToBack,
        };

        assert_eq!(
            to_front.validate(&project, None),
            Err(MutationError::AlreadyInPosition("e2".to_string()))
        );
        assert!(to_back.validate(&project, None).is_ok());
    }
}
