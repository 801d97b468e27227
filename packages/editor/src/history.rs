//! # Undo/Redo History
//!
//! Snapshot history for the live project's card list.
//!
//! ## Design
//!
//! - A snapshot of the whole card list is recorded *before* an undoable
//!   mutation is applied, so the top of `past` is always the pre-mutation
//!   state
//! - Undo moves the live list onto `future` and restores the top of `past`
//! - Redo is symmetric
//! - Recording a new snapshot clears `future`
//! - A gesture groups many non-recorded updates into a single entry
//!
//! Only cards are captured. Project name, card mode and identity are not
//! part of history.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//!
//! history.record(cards.clone());
//! cards.push(new_card);
//!
//! if let Some(previous) = history.undo(&cards) {
//!     cards = previous;
//! }
//! ```

use cardstudio_model::Card;

/// Card-list snapshot
pub type Snapshot = Vec<Card>;

/// Undo/redo stacks for one project
#[derive(Debug, Clone)]
pub struct History {
    /// Older snapshots (most recent last)
    past: Vec<Snapshot>,

    /// Undone snapshots (next redo last)
    future: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Card list captured when the current gesture began
    gesture_start: Option<Snapshot>,
}

impl History {
    /// Create a history with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_levels,
            gesture_start: None,
        }
    }

    /// Record the pre-mutation card list
    pub fn record(&mut self, snapshot: Snapshot) {
        self.push_past(snapshot);

        // A new edit invalidates everything that was undone
        self.future.clear();
    }

    fn push_past(&mut self, snapshot: Snapshot) {
        self.past.push(snapshot);

        if self.max_levels > 0 && self.past.len() > self.max_levels {
            self.past.remove(0);
        }
    }

    /// Step back. Returns the card list to install, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self, current: &[Card]) -> Option<Snapshot> {
        let previous = self.past.pop()?;
        self.gesture_start = None;
        self.future.push(current.to_vec());
        Some(previous)
    }

    /// Step forward. Returns the card list to install, or `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self, current: &[Card]) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.gesture_start = None;
        self.push_past(current.to_vec());
        Some(next)
    }

    /// Start grouping continuous updates into one entry
    pub fn begin_gesture(&mut self, current: &[Card]) {
        self.gesture_start = Some(current.to_vec());
    }

    /// Finish a gesture. Records the pre-gesture list if the cards changed
    /// and returns whether an entry was added.
    pub fn end_gesture(&mut self, current: &[Card]) -> bool {
        match self.gesture_start.take() {
            Some(start) if start.as_slice() != current => {
                self.record(start);
                true
            }
            _ => false,
        }
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture_start.is_some()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Drop all history (new or switched document)
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.gesture_start = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
