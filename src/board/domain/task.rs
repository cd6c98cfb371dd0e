//! Task aggregate root and the kanban status it moves through.

use super::{BoardDomainError, ParseTaskStatusError, ResponsibleId, TaskId, blank};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kanban stage of a task. Declaration order is board column order.
///
/// Written as the household label; read with the same lenient parser as
/// [`FromStr`](std::str::FromStr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "A fazer")]
    Todo,
    /// Work is under way.
    #[serde(rename = "Fazendo")]
    Doing,
    /// Work is finished.
    #[serde(rename = "Concluido")]
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    /// Returns the canonical machine representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns the household-facing label stored with the board.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "A fazer",
            Self::Doing => "Fazendo",
            Self::Done => "Concluido",
        }
    }

    /// Returns whether a task needs an assigned responsible in this status.
    #[must_use]
    pub const fn requires_responsible(self) -> bool {
        matches!(self, Self::Doing | Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "todo" | "a fazer" => Ok(Self::Todo),
            "doing" | "fazendo" => Ok(Self::Doing),
            "done" | "concluido" | "concluído" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

/// User-editable task fields shared by creation and modal edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    description: Option<String>,
    responsible_id: Option<ResponsibleId>,
    status: TaskStatus,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl TaskDetails {
    /// Creates task details with a validated title and `Todo` status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            responsible_id: None,
            status: TaskStatus::Todo,
            start_date: None,
            due_date: None,
        })
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let raw = description.into();
        let trimmed = raw.trim();
        self.description = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Sets the assigned responsible.
    #[must_use]
    pub fn with_responsible(mut self, responsible_id: ResponsibleId) -> Self {
        self.responsible_id = Some(responsible_id);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the assigned responsible, if any.
    #[must_use]
    pub const fn responsible_id(&self) -> Option<&ResponsibleId> {
        self.responsible_id.as_ref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(rename = "titulo")]
    title: String,
    #[serde(rename = "descricao", default, with = "blank")]
    description: Option<String>,
    #[serde(rename = "responsavelId", default, with = "blank")]
    responsible_id: Option<ResponsibleId>,
    status: TaskStatus,
    #[serde(rename = "dataInicio", default, with = "blank")]
    start_date: Option<NaiveDate>,
    #[serde(rename = "dataPrazo", default, with = "blank")]
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted editable fields.
    pub details: TaskDetails,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ResponsibleRequired`] when the requested
    /// status needs a responsible and none is given.
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let timestamp = clock.utc();
        let task = Self::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            details,
            created_at: timestamp,
            updated_at: timestamp,
        });
        task.ensure_assignable(task.status, task.responsible_id.as_ref())?;
        Ok(task)
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let TaskDetails {
            title,
            description,
            responsible_id,
            status,
            start_date,
            due_date,
        } = data.details;
        Self {
            id: data.id,
            title,
            description,
            responsible_id,
            status,
            start_date,
            due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assigned responsible, if any.
    #[must_use]
    pub const fn responsible_id(&self) -> Option<&ResponsibleId> {
        self.responsible_id.as_ref()
    }

    /// Returns whether the task is assigned to `responsible_id`.
    #[must_use]
    pub fn is_assigned_to(&self, responsible_id: &ResponsibleId) -> bool {
        self.responsible_id.as_ref() == Some(responsible_id)
    }

    /// Returns the kanban status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the due date has passed on `today` for unfinished
    /// work.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < today)
    }

    /// Overwrites every editable field.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ResponsibleRequired`] when the new status
    /// needs a responsible and none is given; the task is left untouched.
    pub fn apply_details(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        self.ensure_assignable(details.status, details.responsible_id.as_ref())?;
        self.title = details.title;
        self.description = details.description;
        self.responsible_id = details.responsible_id;
        self.status = details.status;
        self.start_date = details.start_date;
        self.due_date = details.due_date;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `status`.
    ///
    /// Returns `false` without touching the task when it is already there.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ResponsibleRequired`] when the status
    /// needs a responsible and the task has none.
    pub fn move_to(
        &mut self,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<bool, BoardDomainError> {
        if self.status == status {
            return Ok(false);
        }
        self.ensure_assignable(status, self.responsible_id.as_ref())?;
        self.status = status;
        self.touch(clock);
        Ok(true)
    }

    /// Assigns a responsible and moves to `status` as one change.
    pub fn assign_and_move(
        &mut self,
        responsible_id: ResponsibleId,
        status: TaskStatus,
        clock: &impl Clock,
    ) {
        self.responsible_id = Some(responsible_id);
        self.status = status;
        self.touch(clock);
    }

    fn ensure_assignable(
        &self,
        status: TaskStatus,
        responsible_id: Option<&ResponsibleId>,
    ) -> Result<(), BoardDomainError> {
        if status.requires_responsible() && responsible_id.is_none() {
            return Err(BoardDomainError::ResponsibleRequired {
                task_id: self.id.clone(),
                status,
            });
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
