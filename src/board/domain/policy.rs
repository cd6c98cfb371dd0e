//! Required-field rules for new tasks.

use super::{BoardDomainError, ParseTaskCreationPolicyError, TaskDetails};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which field a new task must carry besides its title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCreationPolicy {
    /// A due date is required; the responsible may be chosen later, when
    /// the task first leaves `Todo`.
    #[default]
    #[serde(alias = "deferred")]
    DeferredAssignment,
    /// A responsible is required up front; dates are optional.
    AssigneeRequired,
}

impl TaskCreationPolicy {
    /// Checks that `details` carries the fields this policy requires.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::MissingDueDate`] or
    /// [`BoardDomainError::MissingResponsible`].
    pub const fn validate(self, details: &TaskDetails) -> Result<(), BoardDomainError> {
        match self {
            Self::DeferredAssignment if details.due_date().is_none() => {
                Err(BoardDomainError::MissingDueDate)
            }
            Self::AssigneeRequired if details.responsible_id().is_none() => {
                Err(BoardDomainError::MissingResponsible)
            }
            _ => Ok(()),
        }
    }
}

impl FromStr for TaskCreationPolicy {
    type Err = ParseTaskCreationPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deferred" | "deferred-assignment" => Ok(Self::DeferredAssignment),
            "assignee-required" | "required" => Ok(Self::AssigneeRequired),
            _ => Err(ParseTaskCreationPolicyError(value.to_owned())),
        }
    }
}
