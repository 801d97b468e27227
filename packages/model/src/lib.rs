//! # Card Studio Model
//!
//! Plain data types for greeting-card documents and their persisted JSON
//! layout.
//!
//! ```text
//! Project ─┬─ Card ─┬─ Element (face = front)
//!          │        ├─ Element (face = inside-left)
//!          │        └─ ...
//!          └─ Card ── ...
//! ```
//!
//! Nothing in this crate performs I/O or tracks editing state; the editor
//! crate owns mutation, history and selection.

pub mod card;
pub mod element;
pub mod id_generator;
pub mod project;

pub use card::{Card, Celebration, ZOrder, DEFAULT_BACKGROUND};
pub use element::{Element, ElementPatch, ElementType, Face};
pub use id_generator::{session_seed, IdGenerator};
pub use project::{CardMode, Project, ProjectIdentity, LOCAL_ID_PREFIX};
