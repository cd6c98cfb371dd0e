//! Service-level errors and outcomes for board operations.

use crate::board::domain::{BoardDomainError, PendingStatusChange, ResponsibleId, Task};
use thiserror::Error;

/// Service-level errors for board operations.
///
/// Every variant is raised before the board is mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The operation needs at least one registered responsible.
    #[error("register a responsible first")]
    EmptyResponsibleSet,

    /// The responsible still has tasks assigned.
    #[error("responsible {responsible_id} still has {task_count} assigned task(s)")]
    ResponsibleInUse {
        /// Responsible that was being deleted.
        responsible_id: ResponsibleId,
        /// Number of tasks still referencing it.
        task_count: usize,
    },

    /// The referenced responsible is not on the board.
    #[error("unknown responsible: {0}")]
    UnknownResponsible(ResponsibleId),

    /// No status change is waiting for a responsible.
    #[error("no status change is waiting for a responsible")]
    NoPendingStatusChange,
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Result of a mutation addressed by identifier.
///
/// A missing target is a benign race with a stale view rather than a
/// failure, so it is reported here instead of as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome<T> {
    /// The mutation was applied; carries the resulting value.
    Applied(T),
    /// No entry with the given identifier exists.
    NotFound,
}

impl<T> MutationOutcome<T> {
    /// Returns the applied value, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Returns whether the target was missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result of a status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// The task moved; carries the updated task.
    Applied(Task),
    /// The task already had the requested status. Nothing was written.
    Unchanged,
    /// The task has no responsible; the change waits for one to be chosen.
    AwaitingResponsible(PendingStatusChange),
    /// No task with the given identifier exists.
    NotFound,
}
