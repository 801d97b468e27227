//! # Workspace
//!
//! The projects open side by side in one session (tabs). Each slot holds a
//! snapshot of a project; the active slot mirrors the live project so tab
//! thumbnails stay current.
//!
//! ## Sync guard
//!
//! Loading a slot into the live state and mirroring the live state back
//! into the active slot must not interleave: the mirror that the load
//! itself triggers would otherwise write the previous document's cards
//! into the slot it just read. [`SyncPhase::Swapping`] marks the tick in
//! which a load happened; mirrors during it are deferred until the tick
//! ends.

use cardstudio_model::Project;

/// Whether live → workspace mirroring is currently allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPhase {
    #[default]
    Live,
    /// A slot was just loaded; mirroring is deferred until the tick ends
    Swapping,
}

/// Effect of removing a slot on the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Removed a slot after the active one
    Unaffected,
    /// Removed a slot before the active one; same project, new index
    ActiveShifted(usize),
    /// Removed the active slot; the project at this index must be loaded
    ActiveRemoved(usize),
}

#[derive(Debug, Clone)]
pub struct Workspace {
    projects: Vec<Project>,
    active_index: usize,
}

impl Workspace {
    /// Workspace holding a single project
    pub fn new(initial: Project) -> Self {
        Self {
            projects: vec![initial],
            active_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Always false: a workspace holds at least one project
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub(crate) fn set_active(&mut self, index: usize) {
        debug_assert!(index < self.projects.len());
        self.active_index = index;
    }

    /// Overwrite the active slot
    pub(crate) fn store_active(&mut self, project: Project) {
        self.projects[self.active_index] = project;
    }

    /// Append a slot and return its index
    pub(crate) fn push(&mut self, project: Project) -> usize {
        self.projects.push(project);
        self.projects.len() - 1
    }

    /// Remove a slot. `None` if the index is out of range or it is the last
    /// remaining slot.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Removal> {
        if self.projects.len() <= 1 || index >= self.projects.len() {
            return None;
        }

        self.projects.remove(index);

        let removal = if index < self.active_index {
            self.active_index -= 1;
            Removal::ActiveShifted(self.active_index)
        } else if index == self.active_index {
            self.active_index = index.saturating_sub(1).min(self.projects.len() - 1);
            Removal::ActiveRemoved(self.active_index)
        } else {
            Removal::Unaffected
        };

        Some(removal)
    }
}
