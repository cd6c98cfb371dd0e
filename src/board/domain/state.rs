//! In-memory board state owned by the board service.

use super::{BoardSnapshot, Responsible, Task, UiState};

/// Board data plus the transient interaction fields.
///
/// Only [`BoardSnapshot`] is ever persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    snapshot: BoardSnapshot,
    ui: UiState,
}

impl BoardState {
    /// Creates state from a loaded snapshot with fresh UI fields.
    #[must_use]
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        Self {
            snapshot,
            ui: UiState::default(),
        }
    }

    /// Returns the persisted part of the state.
    #[must_use]
    pub const fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Returns responsibles in insertion order.
    #[must_use]
    pub fn responsibles(&self) -> &[Responsible] {
        &self.snapshot.responsibles
    }

    /// Returns tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.snapshot.tasks
    }

    /// Returns the interaction fields.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Replaces the persisted part, keeping the interaction fields.
    pub fn replace_snapshot(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = snapshot;
    }

    pub(crate) const fn snapshot_mut(&mut self) -> &mut BoardSnapshot {
        &mut self.snapshot
    }

    pub(crate) const fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }
}
