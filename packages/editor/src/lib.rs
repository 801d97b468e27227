//! # Card Studio Editor
//!
//! Editing engine for multi-card greeting-card projects.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element / Card / Project (+ JSON)    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorStore                         │
//! │  - Mutations with validation                │
//! │  - Snapshot undo/redo history               │
//! │  - Selection and derived views              │
//! │  - Workspace of open projects               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ collaborators: renderer, toolbar, storage   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Cards are the source of truth**: active card, elements, background
//!    and selection details are computed on read
//! 2. **One write path**: every edit is a [`Mutation`], classified once as
//!    structural, continuous, view-only or metadata
//! 3. **Permissive**: stale ids are silent no-ops, never errors
//! 4. **No I/O**: persistence, rendering and network access live in
//!    collaborators that call back into the store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardstudio_editor::{EditorConfig, EditorStore};
//! use cardstudio_model::ElementType;
//!
//! let mut store = EditorStore::new(EditorConfig::default());
//!
//! let id = store.add_element(ElementType::Text, "Happy birthday!", None);
//! store.undo();
//! store.redo();
//!
//! let json = store.export_project_json()?;
//! ```

mod config;
mod errors;
mod history;
mod import;
mod mutations;
mod store;
mod workspace;

pub use config::EditorConfig;
pub use errors::EditorError;
pub use history::{History, Snapshot};
pub use import::{parse_project, validate_project};
pub use mutations::{Applied, Mutation, MutationError, MutationKind};
pub use store::EditorStore;
pub use workspace::{Removal, SyncPhase, Workspace};

// Re-export model types for convenience
pub use cardstudio_model as model;
