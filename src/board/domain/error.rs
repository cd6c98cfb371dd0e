//! Error types for board domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The responsible name is empty after trimming.
    #[error("responsible name must not be empty")]
    EmptyResponsibleName,

    /// An identifier value is empty after trimming.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// The creation policy requires a due date and none was given.
    #[error("task due date is required")]
    MissingDueDate,

    /// The creation policy requires a responsible and none was given.
    #[error("task responsible is required")]
    MissingResponsible,

    /// The target status needs an assigned responsible.
    #[error("task {task_id} needs a responsible before moving to {status}")]
    ResponsibleRequired {
        /// Task that was being changed.
        task_id: TaskId,
        /// Status that was requested.
        status: TaskStatus,
    },

    /// The daily template title is empty after trimming.
    #[error("daily template title must not be empty")]
    EmptyTemplateTitle,
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task creation policy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task creation policy: {0}")]
pub struct ParseTaskCreationPolicyError(pub String);
