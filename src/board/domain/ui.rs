//! Transient interaction state. Never persisted.

use super::{TaskId, TaskStatus};

/// Which task dialog is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    /// Creating a new task.
    Create,
    /// Editing an existing task.
    Edit(TaskId),
}

/// Top-level board tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardTab {
    /// Kanban columns.
    #[default]
    Board,
    /// Responsible registration.
    Responsibles,
}

/// Status change waiting for a responsible to be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusChange {
    /// Task being moved.
    pub task_id: TaskId,
    /// Requested status.
    pub target: TaskStatus,
}

/// Interaction state held next to the board data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Open task dialog, if any.
    pub modal: Option<ModalMode>,
    /// Task currently being dragged, if any.
    pub dragged_task: Option<TaskId>,
    /// Selected tab.
    pub active_tab: BoardTab,
    /// Status change awaiting responsible selection, if any.
    pub pending_status_change: Option<PendingStatusChange>,
}
