//! # Editor Store
//!
//! The single in-process owner of editing state for one page: the live
//! project, the active card pointer, the selection, undo history and the
//! open workspace.
//!
//! Consumers hold the store (or a handle wrapping it) explicitly; there is
//! no global instance. Everything derived from the card list (active card,
//! its elements, background, current face, selected element) is computed on
//! read, so there are no duplicate fields to drift out of sync. Callers read
//! current state through accessors at the moment they need it rather than
//! keeping copies across async boundaries.
//!
//! ## Write path
//!
//! ```text
//! Mutation ─→ validate ─→ record history (Structural only) ─→ apply ─→ mirror to workspace
//!               │
//!               └─ no target → MutationError, nothing changes
//! ```

use cardstudio_model::{
    Card, CardMode, Celebration, Element, ElementPatch, ElementType, Face, IdGenerator, Project,
    ProjectIdentity, ZOrder,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::config::EditorConfig;
use crate::history::History;
use crate::import::{parse_project, validate_project};
use crate::mutations::{active_card, Applied, Mutation, MutationError};
use crate::workspace::{Removal, SyncPhase, Workspace};
use crate::EditorError;

pub struct EditorStore {
    config: EditorConfig,
    ids: IdGenerator,

    /// Live state of the active workspace project
    project: Project,
    active_card_id: Option<String>,
    selected_element_id: Option<String>,

    /// Font family given to new elements
    current_font: String,
    zoom: f64,

    history: History,
    workspace: Workspace,
    sync_phase: SyncPhase,
    sync_deferred: bool,
}

impl EditorStore {
    pub fn new(config: EditorConfig) -> Self {
        let mut ids = match &config.id_seed {
            Some(seed) => IdGenerator::from_seed(seed.clone()),
            None => IdGenerator::for_session(),
        };
        let project = Project::new(Card::new(ids.new_id(), config.default_background.clone()));
        let active_card_id = project.cards.first().map(|c| c.id.clone());

        Self {
            ids,
            active_card_id,
            selected_element_id: None,
            current_font: config.default_font.clone(),
            zoom: config.default_zoom,
            history: History::with_max_levels(config.history_limit),
            workspace: Workspace::new(project.clone()),
            project,
            sync_phase: SyncPhase::Live,
            sync_deferred: false,
            config,
        }
    }

    // ---- Derived views -------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn cards(&self) -> &[Card] {
        &self.project.cards
    }

    pub fn card_mode(&self) -> CardMode {
        self.project.card_mode
    }

    pub fn name(&self) -> &str {
        &self.project.name
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.project.identity
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.project.updated_at
    }

    pub fn active_card_id(&self) -> Option<&str> {
        self.active_card_id.as_deref()
    }

    /// Active card, if the pointer names a card that still exists
    pub fn active_card(&self) -> Option<&Card> {
        active_card(&self.project, self.active_card_id.as_deref())
    }

    /// Elements of the active card (empty without one)
    pub fn elements(&self) -> &[Element] {
        self.active_card().map(|c| c.elements.as_slice()).unwrap_or(&[])
    }

    pub fn background_color(&self) -> Option<&str> {
        self.active_card().map(|c| c.background_color.as_str())
    }

    pub fn current_face(&self) -> Face {
        self.active_card().map(|c| c.current_face).unwrap_or_default()
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected_element_id.as_deref()
    }

    /// Selected element within the active card. A stale selection id reads
    /// as nothing selected.
    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selected_element_id.as_deref()?;
        self.active_card()?.element(id)
    }

    pub fn current_font(&self) -> &str {
        &self.current_font
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn sync_phase(&self) -> SyncPhase {
        self.sync_phase
    }

    // ---- Write path ----------------------------------------------------

    /// Apply a mutation to the live project
    ///
    /// Structural mutations snapshot the card list first so they can be
    /// undone. Mutations without a valid target change nothing.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Applied, MutationError> {
        let kind = mutation.kind();

        if let Err(reason) = mutation.validate(&self.project, self.active_card_id.as_deref()) {
            debug!(mutation = mutation.name(), %reason, "Skipped mutation");
            return Err(reason);
        }

        let recorded_history = kind.records_history();
        // A structural edit splits an open gesture: the updates so far become
        // their own entry and the gesture restarts after the edit
        let split_gesture = recorded_history && self.history.in_gesture();
        if split_gesture {
            self.history.end_gesture(&self.project.cards);
        }
        if recorded_history {
            self.history.record(self.project.cards.clone());
        }

        let created_id = self.apply_validated(mutation);
        if split_gesture {
            self.history.begin_gesture(&self.project.cards);
        }
        self.sync_to_workspace();

        Ok(Applied {
            kind,
            created_id,
            recorded_history,
        })
    }

    fn apply_validated(&mut self, mutation: Mutation) -> Option<String> {
        match mutation {
            Mutation::AddElement {
                element_type,
                content,
                overrides,
            } => Some(self.apply_add_element(element_type, content, &overrides)),

            Mutation::UpdateElement { element_id, patch } => {
                if let Some(element) = self.project.element_mut(&element_id) {
                    element.apply_patch(&patch);
                }
                None
            }

            Mutation::RemoveElement { element_id } => {
                for card in &mut self.project.cards {
                    if card.remove_element(&element_id).is_some() {
                        break;
                    }
                }
                if self.selected_element_id.as_deref() == Some(element_id.as_str()) {
                    self.selected_element_id = None;
                }
                None
            }

            Mutation::ReorderElement { element_id, order } => {
                if let Some(card) = self.project.cards.iter_mut().find(|c| c.contains_element(&element_id)) {
                    card.reorder_element(&element_id, order);
                }
                None
            }

            Mutation::AddCard => Some(self.apply_add_card()),

            Mutation::RemoveCard { card_id } => {
                self.apply_remove_card(&card_id);
                None
            }

            Mutation::DuplicateCard { card_id } => self.apply_duplicate_card(&card_id),

            Mutation::SetCardFace { card_id, face } => {
                if let Some(card) = self.project.card_mut(&card_id) {
                    card.current_face = face;
                }
                None
            }

            Mutation::SetBackgroundColor { color } => {
                if let Some(card) = self.active_card_mut() {
                    card.background_color = color;
                }
                None
            }

            Mutation::SetCelebration {
                card_id,
                celebration,
                emoji,
            } => {
                if let Some(card) = self.project.card_mut(&card_id) {
                    card.celebration = Some(celebration);
                    card.celebration_emoji = emoji;
                }
                None
            }

            Mutation::SetAudio { card_id, src } => {
                if let Some(card) = self.project.card_mut(&card_id) {
                    card.audio_src = src;
                }
                None
            }

            Mutation::SetCardMode { mode } => {
                self.project.card_mode = mode;
                None
            }

            Mutation::RenameProject { name } => {
                self.project.name = name;
                None
            }
        }
    }

    fn apply_add_element(&mut self, element_type: ElementType, content: String, overrides: &ElementPatch) -> String {
        let id = fresh_id(&mut self.ids, &self.project);
        let face = self.current_face();

        let mut element = Element::new(id.clone(), element_type, content, face);
        element.x = self.config.default_x;
        element.y = self.config.default_y;
        element.font_size = Some(match element_type {
            ElementType::Emoji => self.config.emoji_font_size,
            _ => self.config.text_font_size,
        });
        element.font_family = Some(self.current_font.clone());
        if element_type == ElementType::Text {
            element.color = Some(self.config.default_text_color.clone());
        }
        element.apply_patch(overrides);

        if let Some(card) = self.active_card_mut() {
            debug!(element_id = %id, card_id = %card.id, face = ?element.face, "Added element");
            card.elements.push(element);
        }
        self.selected_element_id = Some(id.clone());
        id
    }

    fn apply_add_card(&mut self) -> String {
        let card = Card::new(fresh_id(&mut self.ids, &self.project), self.config.default_background.clone());
        let id = card.id.clone();
        self.project.cards.push(card);
        self.active_card_id = Some(id.clone());

        // A structurally different document must not overwrite the saved one
        self.project.identity = ProjectIdentity::Unsaved;
        id
    }

    fn apply_remove_card(&mut self, card_id: &str) {
        self.project.cards.retain(|c| c.id != card_id);

        if self.project.cards.is_empty() {
            let replacement = Card::new(fresh_id(&mut self.ids, &self.project), self.config.default_background.clone());
            debug!(card_id = %replacement.id, "Replaced last card with an empty one");
            self.project.cards.push(replacement);
        }

        if self.active_card_id.as_deref() == Some(card_id) {
            self.active_card_id = None;
        }
    }

    fn apply_duplicate_card(&mut self, card_id: &str) -> Option<String> {
        let index = self.project.card_index(card_id)?;
        let source = self.project.cards[index].clone();

        let ids = &mut self.ids;
        let project = &self.project;
        let copy = source.deep_copy(|| fresh_id(ids, project));
        let copy_id = copy.id.clone();

        self.project.cards.insert(index + 1, copy);
        self.active_card_id = Some(copy_id.clone());
        Some(copy_id)
    }

    fn active_card_mut(&mut self) -> Option<&mut Card> {
        let id = self.active_card_id.as_deref()?;
        self.project.cards.iter_mut().find(|c| c.id == id)
    }

    // ---- Element operations --------------------------------------------

    /// Add an element to the active card and select it. Returns the new id,
    /// or `None` without an active card.
    pub fn add_element(&mut self, element_type: ElementType, content: impl Into<String>, overrides: Option<ElementPatch>) -> Option<String> {
        self.apply(Mutation::AddElement {
            element_type,
            content: content.into(),
            overrides: overrides.unwrap_or_default(),
        })
        .ok()
        .and_then(|applied| applied.created_id)
    }

    /// Merge updates into an element on any card. Not recorded in history.
    pub fn update_element(&mut self, element_id: &str, patch: ElementPatch) {
        let _ = self.apply(Mutation::UpdateElement {
            element_id: element_id.to_string(),
            patch,
        });
    }

    pub fn remove_element(&mut self, element_id: &str) {
        let _ = self.apply(Mutation::RemoveElement {
            element_id: element_id.to_string(),
        });
    }

    /// Copy an element's content and style into the active card, offset
    /// down and to the right
    pub fn duplicate_element(&mut self, element_id: &str) -> Option<String> {
        let original = self.project.element(element_id)?;
        let offset = self.config.duplicate_offset;

        let overrides = ElementPatch::copy_style(original).position(original.x + offset, original.y + offset);
        let element_type = original.element_type;
        let content = original.content.clone();

        self.add_element(element_type, content, Some(overrides))
    }

    pub fn reorder_element(&mut self, element_id: &str, order: ZOrder) {
        let _ = self.apply(Mutation::ReorderElement {
            element_id: element_id.to_string(),
            order,
        });
    }

    // ---- Card operations -----------------------------------------------

    /// Append an empty card and make it active. The project becomes unsaved.
    pub fn add_card(&mut self) -> String {
        self.apply(Mutation::AddCard)
            .ok()
            .and_then(|applied| applied.created_id)
            .unwrap_or_default()
    }

    pub fn remove_card(&mut self, card_id: &str) {
        let _ = self.apply(Mutation::RemoveCard {
            card_id: card_id.to_string(),
        });
    }

    pub fn duplicate_card(&mut self, card_id: &str) -> Option<String> {
        self.apply(Mutation::DuplicateCard {
            card_id: card_id.to_string(),
        })
        .ok()
        .and_then(|applied| applied.created_id)
    }

    pub fn set_card_face(&mut self, card_id: &str, face: Face) {
        let _ = self.apply(Mutation::SetCardFace {
            card_id: card_id.to_string(),
            face,
        });
    }

    /// Flip the active card
    pub fn set_current_face(&mut self, face: Face) {
        if let Some(card_id) = self.active_card_id.clone() {
            self.set_card_face(&card_id, face);
        }
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        let _ = self.apply(Mutation::SetBackgroundColor { color: color.into() });
    }

    pub fn set_celebration(&mut self, card_id: &str, celebration: Celebration, emoji: Option<String>) {
        let _ = self.apply(Mutation::SetCelebration {
            card_id: card_id.to_string(),
            celebration,
            emoji,
        });
    }

    pub fn set_audio(&mut self, card_id: &str, src: Option<String>) {
        let _ = self.apply(Mutation::SetAudio {
            card_id: card_id.to_string(),
            src,
        });
    }

    pub fn set_card_mode(&mut self, mode: CardMode) {
        let _ = self.apply(Mutation::SetCardMode { mode });
    }

    pub fn rename_project(&mut self, name: impl Into<String>) {
        let _ = self.apply(Mutation::RenameProject { name: name.into() });
    }

    /// Point the active card at the first card
    pub fn focus_first_card(&mut self) {
        self.active_card_id = self.project.cards.first().map(|c| c.id.clone());
    }

    // ---- Selection and view state --------------------------------------

    /// Select an element (or clear with `None`). Selecting an element on
    /// another card makes that card active.
    pub fn select_element(&mut self, element_id: Option<&str>) {
        self.selected_element_id = element_id.map(str::to_string);

        let Some(id) = element_id else {
            return;
        };
        if let Some(owner) = self.project.owner_of(id) {
            if self.active_card_id.as_deref() != Some(owner.id.as_str()) {
                debug!(element_id = %id, card_id = %owner.id, "Selection switched active card");
                self.active_card_id = Some(owner.id.clone());
            }
        }
    }

    /// Make a card active; unknown ids are ignored
    pub fn set_active_card(&mut self, card_id: &str) {
        if self.project.card(card_id).is_some() {
            self.active_card_id = Some(card_id.to_string());
        }
    }

    pub fn set_current_font(&mut self, font: impl Into<String>) {
        self.current_font = font.into();
    }

    /// Set the zoom factor, clamped to the configured bounds
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = self.config.clamp_zoom(zoom);
        }
    }

    // ---- History -------------------------------------------------------

    /// Restore the card list before the last structural edit
    ///
    /// The active card pointer and selection are left alone, so undoing an
    /// added or duplicated card leaves the pointer naming a card that no
    /// longer exists. Derived views then read as empty and element adds are
    /// skipped until the caller re-derives the active card
    /// (`focus_first_card` or `set_active_card`).
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.project.cards) else {
            return false;
        };
        self.project.cards = previous;
        debug!(
            past = self.history.undo_levels(),
            future = self.history.redo_levels(),
            "Undo"
        );
        self.sync_to_workspace();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.project.cards) else {
            return false;
        };
        self.project.cards = next;
        debug!(
            past = self.history.undo_levels(),
            future = self.history.redo_levels(),
            "Redo"
        );
        self.sync_to_workspace();
        true
    }

    /// Start a drag/resize gesture; the updates until `end_gesture` become
    /// one undo step
    pub fn begin_gesture(&mut self) {
        self.history.begin_gesture(&self.project.cards);
    }

    /// Returns whether the gesture produced a history entry
    pub fn end_gesture(&mut self) -> bool {
        self.history.end_gesture(&self.project.cards)
    }

    // ---- Persistence collaborator --------------------------------------

    /// Replace the live project with one loaded from storage, keeping its
    /// identity. History is reset.
    #[instrument(skip_all, fields(id = ?project.identity.id()))]
    pub fn load_project(&mut self, project: Project) -> Result<(), EditorError> {
        validate_project(&project)?;
        info!(cards = project.cards.len(), "Loaded project");
        self.install(project);
        self.sync_to_workspace();
        Ok(())
    }

    /// Replace the live project with an imported JSON document. The import
    /// is unsaved; on error nothing changes.
    pub fn import_project_json(&mut self, source: &str) -> Result<(), EditorError> {
        let mut project = parse_project(source)?;
        project.identity = ProjectIdentity::Unsaved;
        project.updated_at = None;

        info!(cards = project.cards.len(), mode = ?project.card_mode, "Imported project");
        self.install(project);
        self.sync_to_workspace();
        Ok(())
    }

    pub fn export_project_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.project)?)
    }

    /// Record a successful save by the persistence collaborator
    pub fn mark_saved(&mut self, identity: ProjectIdentity, at: DateTime<Utc>) {
        debug!(id = ?identity.id(), "Project saved");
        self.project.identity = identity;
        self.project.updated_at = Some(at);
        self.sync_to_workspace();
    }

    fn install(&mut self, project: Project) {
        self.active_card_id = project.cards.first().map(|c| c.id.clone());
        self.project = project;
        self.selected_element_id = None;
        self.history.clear();
    }

    // ---- Workspace -----------------------------------------------------

    /// Load a workspace slot into the live state. History is reset and the
    /// workspace mirror is suppressed until `end_tick`.
    #[instrument(skip(self))]
    pub fn switch_to_workspace_project(&mut self, index: usize) -> bool {
        if index >= self.workspace.len() {
            debug!(len = self.workspace.len(), "Workspace index out of range");
            return false;
        }

        self.workspace.store_active(self.project.clone());
        self.load_slot(index);
        true
    }

    /// Open a new unsaved project in its own slot and switch to it
    pub fn create_new_project(&mut self) -> usize {
        self.workspace.store_active(self.project.clone());

        let card = Card::new(fresh_id(&mut self.ids, &self.project), self.config.default_background.clone());
        let index = self.workspace.push(Project::new(card));
        info!(index, "Created workspace project");

        self.load_slot(index);
        index
    }

    /// Close a workspace slot. The last slot cannot be closed.
    pub fn remove_workspace_project(&mut self, index: usize) -> bool {
        match self.workspace.remove(index) {
            None => {
                debug!(index, "Refused to remove workspace project");
                false
            }
            Some(Removal::Unaffected) | Some(Removal::ActiveShifted(_)) => true,
            Some(Removal::ActiveRemoved(next)) => {
                self.load_slot(next);
                true
            }
        }
    }

    fn load_slot(&mut self, index: usize) {
        let Some(project) = self.workspace.get(index).cloned() else {
            return;
        };
        info!(index, name = %project.name, cards = project.cards.len(), "Switched workspace project");

        self.workspace.set_active(index);
        self.install(project);
        self.sync_phase = SyncPhase::Swapping;
        self.sync_deferred = false;
    }

    /// Mirror the live project into its workspace slot, unless a slot was
    /// loaded in this tick
    fn sync_to_workspace(&mut self) {
        match self.sync_phase {
            SyncPhase::Swapping => self.sync_deferred = true,
            SyncPhase::Live => self.workspace.store_active(self.project.clone()),
        }
    }

    /// End of an event-loop turn: lift the sync guard and flush any mirror
    /// deferred while it was up
    pub fn end_tick(&mut self) {
        if self.sync_phase == SyncPhase::Swapping {
            self.sync_phase = SyncPhase::Live;
            if std::mem::take(&mut self.sync_deferred) {
                self.sync_to_workspace();
            }
        }
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

/// Next generated id not already used by a card or element of `project`
fn fresh_id(ids: &mut IdGenerator, project: &Project) -> String {
    loop {
        let id = ids.new_id();
        if !project.uses_id(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EditorStore {
        EditorStore::new(EditorConfig::seeded("t"))
    }

    #[test]
    fn test_new_store_has_one_active_card() {
        let store = store();
        assert_eq!(store.cards().len(), 1);
        assert_eq!(store.active_card_id(), Some("t-1"));
        assert_eq!(store.current_face(), Face::Front);
        assert_eq!(store.background_color(), Some("#ffffff"));
        assert!(store.elements().is_empty());
        assert_eq!(store.workspace().len(), 1);
    }

    #[test]
    fn test_add_element_defaults() {
        let mut store = store();
        store.set_current_font("Pacifico");

        let text = store.add_element(ElementType::Text, "Hi", None).unwrap();
        let emoji = store.add_element(ElementType::Emoji, "🎂", None).unwrap();

        let text = store.project().element(&text).unwrap();
        assert_eq!((text.x, text.y), (100.0, 100.0));
        assert_eq!(text.font_size, Some(24.0));
        assert_eq!(text.font_family.as_deref(), Some("Pacifico"));
        assert_eq!(text.color.as_deref(), Some("#000000"));

        let emoji = store.project().element(&emoji).unwrap();
        assert_eq!(emoji.font_size, Some(64.0));
        assert!(emoji.color.is_none());
    }

    #[test]
    fn test_add_element_uses_current_face_unless_overridden() {
        let mut store = store();
        store.set_current_face(Face::InsideRight);

        let on_current = store.add_element(ElementType::Shape, "", None).unwrap();
        let on_back = store
            .add_element(ElementType::Line, "", Some(ElementPatch::new().face(Face::Back).position(5.0, 6.0)))
            .unwrap();

        assert_eq!(store.project().element(&on_current).unwrap().face, Face::InsideRight);
        let back = store.project().element(&on_back).unwrap();
        assert_eq!(back.face, Face::Back);
        assert_eq!((back.x, back.y), (5.0, 6.0));
    }

    #[test]
    fn test_add_element_without_active_card_is_a_no_op() {
        let mut store = store();
        let card_id = store.active_card_id().unwrap().to_string();
        let added = store.add_card();
        store.remove_card(&added);
        assert!(store.active_card_id().is_none());

        let levels = store.history().undo_levels();
        assert!(store.add_element(ElementType::Text, "lost", None).is_none());
        assert_eq!(store.history().undo_levels(), levels);
        assert!(store.project().card(&card_id).unwrap().elements.is_empty());
    }

    #[test]
    fn test_duplicate_element_offsets_copy() {
        let mut store = store();
        let original = store
            .add_element(ElementType::Text, "Hello", Some(ElementPatch::new().color("#ff00ff").position(10.0, 10.0)))
            .unwrap();

        let copy = store.duplicate_element(&original).unwrap();

        let copy = store.project().element(&copy).unwrap();
        assert_ne!(copy.id, original);
        assert_eq!(copy.content, "Hello");
        assert_eq!(copy.color.as_deref(), Some("#ff00ff"));
        assert_eq!((copy.x, copy.y), (30.0, 30.0));
        assert_eq!(store.selected_element_id(), Some(copy.id.as_str()));
    }

    #[test]
    fn test_reorder_element_is_undoable() {
        let mut store = store();
        let a = store.add_element(ElementType::Text, "a", None).unwrap();
        let b = store.add_element(ElementType::Text, "b", None).unwrap();

        store.reorder_element(&a, ZOrder::ToFront);
        let order: Vec<&str> = store.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec![b.as_str(), a.as_str()]);

        assert!(store.undo());
        let order: Vec<&str> = store.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec![a.as_str(), b.as_str()]);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut store = store();
        store.set_zoom(12.0);
        assert_eq!(store.zoom(), 3.0);
        store.set_zoom(f64::NAN);
        assert_eq!(store.zoom(), 3.0);
        store.set_zoom(0.5);
        assert_eq!(store.zoom(), 0.5);
    }

    #[test]
    fn test_metadata_is_not_undoable() {
        let mut store = store();
        let card_id = store.active_card_id().unwrap().to_string();

        store.set_celebration(&card_id, Celebration::Confetti, None);
        store.set_audio(&card_id, Some("data:audio/mp3;base64,AAAA".to_string()));
        store.set_card_mode(CardMode::Envelope);
        store.rename_project("Grandma");

        assert_eq!(store.history().undo_levels(), 0);
        let card = store.active_card().unwrap();
        assert_eq!(card.celebration, Some(Celebration::Confetti));
        assert!(card.audio_src.is_some());
        assert_eq!(store.card_mode(), CardMode::Envelope);
        assert_eq!(store.name(), "Grandma");
    }

    #[test]
    fn test_undo_add_card_leaves_stale_active_pointer() {
        let mut store = store();
        let first = store.active_card_id().unwrap().to_string();
        let added = store.add_card();

        assert!(store.undo());

        assert_eq!(store.active_card_id(), Some(added.as_str()));
        assert!(store.active_card().is_none());
        assert!(store.elements().is_empty());
        assert!(store.add_element(ElementType::Text, "lost", None).is_none());

        store.focus_first_card();
        assert_eq!(store.active_card_id(), Some(first.as_str()));
        assert!(store.add_element(ElementType::Text, "kept", None).is_some());
    }

    #[test]
    fn test_fresh_id_skips_ids_in_use() {
        let mut ids = IdGenerator::from_seed("x");
        let mut project = Project::new(Card::new("x-1", "#fff"));
        project.cards[0]
            .elements
            .push(Element::new("x-2", ElementType::Text, "", Face::Front));

        assert_eq!(fresh_id(&mut ids, &project), "x-3");
    }
}
