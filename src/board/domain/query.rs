//! Read-only views derived from the task list.

use super::{ResponsibleId, Task, TaskStatus};
use chrono::NaiveDate;

/// Filter applied to the board view.
///
/// An absent responsible and blank search text match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    responsible_id: Option<ResponsibleId>,
    search: String,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the view to tasks assigned to `responsible_id`.
    #[must_use]
    pub fn with_responsible(mut self, responsible_id: ResponsibleId) -> Self {
        self.responsible_id = Some(responsible_id);
        self
    }

    /// Restricts the view to titles containing `search`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    /// Returns whether `task` passes both predicates.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let responsible_ok = self
            .responsible_id
            .as_ref()
            .is_none_or(|id| task.is_assigned_to(id));
        let search_ok =
            self.search.is_empty() || task.title().to_lowercase().contains(&self.search);
        responsible_ok && search_ok
    }

    /// Returns the matching tasks in their original order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Task counts shown above the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardSummary {
    /// Number of tasks on the board.
    pub total: usize,
    /// Tasks not started.
    pub todo: usize,
    /// Tasks in progress.
    pub doing: usize,
    /// Finished tasks.
    pub done: usize,
}

impl BoardSummary {
    /// Counts tasks per status.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            match task.status() {
                TaskStatus::Todo => summary.todo += 1,
                TaskStatus::Doing => summary.doing += 1,
                TaskStatus::Done => summary.done += 1,
            }
            summary
        })
    }
}

/// One kanban column of a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    /// Column status.
    pub status: TaskStatus,
    /// Tasks in the column, in board order.
    pub tasks: Vec<&'a Task>,
}

/// Groups the filtered tasks into columns in status order.
#[must_use]
pub fn board_columns<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<BoardColumn<'a>> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| BoardColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status() == status && filter.matches(task))
                .collect(),
        })
        .collect()
}

/// Formats a calendar date as `dd/mm/yyyy`.
#[must_use]
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
