//! Checks applied to projects coming from outside the editor (file import,
//! persistence loads) before they replace live state.

use std::collections::HashSet;

use cardstudio_model::Project;
use tracing::warn;

use crate::EditorError;

/// Parse a persisted project and validate it
pub fn parse_project(source: &str) -> Result<Project, EditorError> {
    let project: Project = serde_json::from_str(source).inspect_err(|e| {
        warn!(error = %e, "Rejected malformed project JSON");
    })?;
    validate_project(&project)?;
    Ok(project)
}

/// Enforce the document invariants: at least one card, non-empty ids, and
/// card/element ids unique across the whole project
pub fn validate_project(project: &Project) -> Result<(), EditorError> {
    let result = check(project);
    if let Err(e) = &result {
        warn!(error = %e, cards = project.cards.len(), "Rejected invalid project");
    }
    result
}

fn check(project: &Project) -> Result<(), EditorError> {
    if project.cards.is_empty() {
        return Err(EditorError::NoCards);
    }

    let mut card_ids = HashSet::new();
    let mut element_ids = HashSet::new();

    for card in &project.cards {
        if card.id.is_empty() {
            return Err(EditorError::EmptyId("card"));
        }
        if !card_ids.insert(card.id.as_str()) {
            return Err(EditorError::DuplicateCardId(card.id.clone()));
        }

        for element in &card.elements {
            if element.id.is_empty() {
                return Err(EditorError::EmptyId("element"));
            }
            if !element_ids.insert(element.id.as_str()) {
                return Err(EditorError::DuplicateElementId(element.id.clone()));
            }
        }
    }

    Ok(())
}
