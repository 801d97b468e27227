//! Browser bindings for the card editor.
//!
//! The page creates one `EditorHandle` and passes it to every component
//! that reads or edits the card (canvas, toolbar, dialogs). Structured
//! values cross the boundary as JSON in the persisted project layout;
//! enum arguments are their JSON tags (`"inside-left"`, `"confetti"`, ...).

use cardstudio_editor::{EditorConfig, EditorStore};
use cardstudio_model::{CardMode, Celebration, ElementPatch, ElementType, Face, Project, ProjectIdentity, ZOrder};
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Decode an enum from its JSON tag
fn parse_tag<T: DeserializeOwned>(what: &str, tag: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(tag.to_string()))
        .map_err(|_| format!("Unknown {}: {}", what, tag))
}

fn parse_json<T: DeserializeOwned>(what: &str, source: &str) -> Result<T, String> {
    serde_json::from_str(source).map_err(|e| format!("Invalid {}: {}", what, e))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn tag_of<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(tag)) => tag,
        _ => String::new(),
    }
}

#[wasm_bindgen]
pub struct EditorHandle {
    store: EditorStore,
}

impl Default for EditorHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EditorHandle {
        EditorHandle {
            store: EditorStore::new(EditorConfig::default()),
        }
    }

    /// Create an editor from a JSON `EditorConfig`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<EditorHandle, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(|e| js_error(e.to_string()))?;
        Ok(EditorHandle {
            store: EditorStore::new(config),
        })
    }

    // ---- Elements ----

    /// Returns the new element id, or undefined without an active card
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(
        &mut self,
        element_type: &str,
        content: &str,
        overrides_json: Option<String>,
    ) -> Result<Option<String>, JsValue> {
        let element_type: ElementType = parse_tag("element type", element_type).map_err(js_error)?;
        let overrides = match overrides_json {
            Some(source) => Some(parse_json::<ElementPatch>("element patch", &source).map_err(js_error)?),
            None => None,
        };
        Ok(self.store.add_element(element_type, content, overrides))
    }

    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, element_id: &str, patch_json: &str) -> Result<(), JsValue> {
        let patch: ElementPatch = parse_json("element patch", patch_json).map_err(js_error)?;
        self.store.update_element(element_id, patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = removeElement)]
    pub fn remove_element(&mut self, element_id: &str) {
        self.store.remove_element(element_id);
    }

    #[wasm_bindgen(js_name = duplicateElement)]
    pub fn duplicate_element(&mut self, element_id: &str) -> Option<String> {
        self.store.duplicate_element(element_id)
    }

    /// `order`: "forward" | "backward" | "toFront" | "toBack"
    #[wasm_bindgen(js_name = reorderElement)]
    pub fn reorder_element(&mut self, element_id: &str, order: &str) -> Result<(), JsValue> {
        let order: ZOrder = parse_tag("z-order", order).map_err(js_error)?;
        self.store.reorder_element(element_id, order);
        Ok(())
    }

    // ---- Cards ----

    #[wasm_bindgen(js_name = addCard)]
    pub fn add_card(&mut self) -> String {
        self.store.add_card()
    }

    #[wasm_bindgen(js_name = removeCard)]
    pub fn remove_card(&mut self, card_id: &str) {
        self.store.remove_card(card_id);
    }

    #[wasm_bindgen(js_name = duplicateCard)]
    pub fn duplicate_card(&mut self, card_id: &str) -> Option<String> {
        self.store.duplicate_card(card_id)
    }

    #[wasm_bindgen(js_name = setCardFace)]
    pub fn set_card_face(&mut self, card_id: &str, face: &str) -> Result<(), JsValue> {
        let face: Face = parse_tag("face", face).map_err(js_error)?;
        self.store.set_card_face(card_id, face);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCurrentFace)]
    pub fn set_current_face(&mut self, face: &str) -> Result<(), JsValue> {
        let face: Face = parse_tag("face", face).map_err(js_error)?;
        self.store.set_current_face(face);
        Ok(())
    }

    #[wasm_bindgen(js_name = setBackgroundColor)]
    pub fn set_background_color(&mut self, color: &str) {
        self.store.set_background_color(color);
    }

    #[wasm_bindgen(js_name = setCelebration)]
    pub fn set_celebration(&mut self, card_id: &str, celebration: &str, emoji: Option<String>) -> Result<(), JsValue> {
        let celebration: Celebration = parse_tag("celebration", celebration).map_err(js_error)?;
        self.store.set_celebration(card_id, celebration, emoji);
        Ok(())
    }

    #[wasm_bindgen(js_name = setAudio)]
    pub fn set_audio(&mut self, card_id: &str, src: Option<String>) {
        self.store.set_audio(card_id, src);
    }

    #[wasm_bindgen(js_name = setCardMode)]
    pub fn set_card_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: CardMode = parse_tag("card mode", mode).map_err(js_error)?;
        self.store.set_card_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = renameProject)]
    pub fn rename_project(&mut self, name: &str) {
        self.store.rename_project(name);
    }

    // ---- Selection and view ----

    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&mut self, element_id: Option<String>) {
        self.store.select_element(element_id.as_deref());
    }

    #[wasm_bindgen(js_name = setActiveCard)]
    pub fn set_active_card(&mut self, card_id: &str) {
        self.store.set_active_card(card_id);
    }

    #[wasm_bindgen(js_name = focusFirstCard)]
    pub fn focus_first_card(&mut self) {
        self.store.focus_first_card();
    }

    #[wasm_bindgen(js_name = setCurrentFont)]
    pub fn set_current_font(&mut self, font: &str) {
        self.store.set_current_font(font);
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.store.set_zoom(zoom);
    }

    // ---- History ----

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Call on pointer-down before a drag/resize
    #[wasm_bindgen(js_name = beginGesture)]
    pub fn begin_gesture(&mut self) {
        self.store.begin_gesture();
    }

    /// Call on pointer-up; returns whether an undo step was recorded
    #[wasm_bindgen(js_name = endGesture)]
    pub fn end_gesture(&mut self) -> bool {
        self.store.end_gesture()
    }

    // ---- Workspace ----

    #[wasm_bindgen(js_name = switchToWorkspaceProject)]
    pub fn switch_to_workspace_project(&mut self, index: usize) -> bool {
        self.store.switch_to_workspace_project(index)
    }

    #[wasm_bindgen(js_name = createNewProject)]
    pub fn create_new_project(&mut self) -> usize {
        self.store.create_new_project()
    }

    #[wasm_bindgen(js_name = removeWorkspaceProject)]
    pub fn remove_workspace_project(&mut self, index: usize) -> bool {
        self.store.remove_workspace_project(index)
    }

    /// Schedule from JS with `queueMicrotask`/`setTimeout` after each switch
    #[wasm_bindgen(js_name = endTick)]
    pub fn end_tick(&mut self) {
        self.store.end_tick();
    }

    #[wasm_bindgen(js_name = activeWorkspaceIndex)]
    pub fn active_workspace_index(&self) -> usize {
        self.store.workspace().active_index()
    }

    #[wasm_bindgen(js_name = workspaceJson)]
    pub fn workspace_json(&self) -> Result<String, JsValue> {
        to_json(self.store.workspace().projects()).map_err(js_error)
    }

    // ---- Persistence ----

    /// Record a completed save: `id` null keeps the project unsaved, ids
    /// starting with `local_` are local-only, anything else is a cloud row
    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self, id: Option<String>, updated_at_ms: f64) -> Result<(), JsValue> {
        let at = Utc
            .timestamp_millis_opt(updated_at_ms as i64)
            .single()
            .ok_or_else(|| js_error(format!("Invalid timestamp: {}", updated_at_ms)))?;
        self.store.mark_saved(ProjectIdentity::from_id(id), at);
        Ok(())
    }

    #[wasm_bindgen(js_name = loadProjectJson)]
    pub fn load_project_json(&mut self, source: &str) -> Result<(), JsValue> {
        let project: Project = parse_json("project", source).map_err(js_error)?;
        self.store.load_project(project).map_err(|e| js_error(e.to_string()))
    }

    #[wasm_bindgen(js_name = importProjectJson)]
    pub fn import_project_json(&mut self, source: &str) -> Result<(), JsValue> {
        self.store
            .import_project_json(source)
            .map_err(|e| js_error(e.to_string()))
    }

    #[wasm_bindgen(js_name = exportProjectJson)]
    pub fn export_project_json(&self) -> Result<String, JsValue> {
        self.store.export_project_json().map_err(|e| js_error(e.to_string()))
    }

    // ---- Reads ----

    #[wasm_bindgen(js_name = cardsJson)]
    pub fn cards_json(&self) -> Result<String, JsValue> {
        to_json(self.store.cards()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = activeCardId)]
    pub fn active_card_id(&self) -> Option<String> {
        self.store.active_card_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = selectedElementId)]
    pub fn selected_element_id(&self) -> Option<String> {
        self.store.selected_element_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = selectedElementJson)]
    pub fn selected_element_json(&self) -> Result<Option<String>, JsValue> {
        self.store
            .selected_element()
            .map(|element| to_json(element).map_err(js_error))
            .transpose()
    }

    #[wasm_bindgen(js_name = currentFace)]
    pub fn current_face(&self) -> String {
        tag_of(&self.store.current_face())
    }

    #[wasm_bindgen(js_name = cardMode)]
    pub fn card_mode(&self) -> String {
        tag_of(&self.store.card_mode())
    }

    #[wasm_bindgen(js_name = backgroundColor)]
    pub fn background_color(&self) -> Option<String> {
        self.store.background_color().map(str::to_string)
    }

    pub fn zoom(&self) -> f64 {
        self.store.zoom()
    }

    #[wasm_bindgen(js_name = projectId)]
    pub fn project_id(&self) -> Option<String> {
        self.store.identity().id().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tag::<Face>("face", "inside-left"), Ok(Face::InsideLeft));
        assert_eq!(parse_tag::<ZOrder>("z-order", "toFront"), Ok(ZOrder::ToFront));
        assert_eq!(parse_tag::<Celebration>("celebration", "floating-emoji"), Ok(Celebration::FloatingEmoji));
        assert_eq!(
            parse_tag::<ElementType>("element type", "video"),
            Err("Unknown element type: video".to_string())
        );
    }

    #[test]
    fn test_tag_of_matches_persisted_layout() {
        assert_eq!(tag_of(&Face::InsideRight), "inside-right");
        assert_eq!(tag_of(&CardMode::Envelope), "envelope");
    }

    #[test]
    fn test_handle_edit_flow() {
        let mut handle = EditorHandle::with_config(r##"{ "idSeed": "web" }"##).unwrap();

        let id = handle
            .add_element("text", "Happy holidays", Some(r##"{ "x": 40, "color": "#c00" }"##.to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(handle.selected_element_id(), Some(id.clone()));

        handle.update_element(&id, r##"{ "rotation": 12 }"##).unwrap();
        handle.set_current_face("back").unwrap();
        assert_eq!(handle.current_face(), "back");

        let selected = handle.selected_element_json().unwrap().unwrap();
        let element: serde_json::Value = serde_json::from_str(&selected).unwrap();
        assert_eq!(element["x"], 40.0);
        assert_eq!(element["rotation"], 12.0);
        assert_eq!(element["color"], "#c00");

        assert!(handle.undo());
        assert!(handle.selected_element_json().unwrap().is_none());
        assert!(handle.can_redo());
    }

    #[test]
    fn test_load_project_keeps_identity() {
        let mut handle = EditorHandle::new();
        let source = r##"{
            "id": "local_42",
            "name": "Saved",
            "cardMode": "envelope",
            "cards": [ { "id": "c1", "backgroundColor": "#fff0f5", "elements": [] } ]
        }"##;

        handle.load_project_json(source).unwrap();

        assert_eq!(handle.project_id(), Some("local_42".to_string()));
        assert_eq!(handle.card_mode(), "envelope");
        assert_eq!(handle.active_card_id(), Some("c1".to_string()));
        assert_eq!(handle.background_color(), Some("#fff0f5".to_string()));
    }

    #[test]
    fn test_handle_workspace_and_save() {
        let mut handle = EditorHandle::new();
        handle.rename_project("One");
        assert_eq!(handle.create_new_project(), 1);
        handle.end_tick();
        assert_eq!(handle.active_workspace_index(), 1);

        handle.mark_saved(Some("local_7".to_string()), 1_700_000_000_000.0).unwrap();
        assert_eq!(handle.project_id(), Some("local_7".to_string()));

        let workspace: serde_json::Value = serde_json::from_str(&handle.workspace_json().unwrap()).unwrap();
        assert_eq!(workspace[0]["name"], "One");
        assert_eq!(workspace[1]["id"], "local_7");
        assert_eq!(workspace[1]["updatedAt"], 1_700_000_000_000i64);
    }
}
