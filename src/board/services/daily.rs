//! Daily task generation.
//!
//! Fixed templates go to the first responsible whose name contains the
//! template's pattern, or stay unassigned when nobody matches. Rotating
//! templates are dealt round-robin over the responsible list starting at
//! the first responsible, so earlier responsibles receive the extra task
//! when the counts do not divide evenly.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::domain::{
    DailyTaskTemplate, Responsible, ResponsibleId, Task, TaskDetails, default_daily_templates,
};
use chrono::NaiveDate;
use mockable::Clock;

/// Generates one day's batch of tasks from a template catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTaskGenerator {
    templates: Vec<DailyTaskTemplate>,
}

impl Default for DailyTaskGenerator {
    fn default() -> Self {
        Self::new(default_daily_templates())
    }
}

impl DailyTaskGenerator {
    /// Creates a generator for the given catalog.
    #[must_use]
    pub const fn new(templates: Vec<DailyTaskTemplate>) -> Self {
        Self { templates }
    }

    /// Returns the template catalog.
    #[must_use]
    pub fn templates(&self) -> &[DailyTaskTemplate] {
        &self.templates
    }

    /// Builds one task per template for today, in `Todo`, starting and due
    /// today.
    ///
    /// Fixed templates come first, then rotating ones, each group in
    /// catalog order. Nothing is appended anywhere; the caller owns the
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::EmptyResponsibleSet`] when
    /// `responsibles` is empty.
    pub fn generate(
        &self,
        responsibles: &[Responsible],
        clock: &impl Clock,
    ) -> BoardServiceResult<Vec<Task>> {
        if responsibles.is_empty() {
            return Err(BoardServiceError::EmptyResponsibleSet);
        }
        let today = clock.utc().date_naive();

        let (fixed, rotating): (Vec<&DailyTaskTemplate>, Vec<&DailyTaskTemplate>) = self
            .templates
            .iter()
            .partition(|template| template.fixed_assignee().is_some());

        let fixed_assignments = fixed.into_iter().map(|template| {
            let assignee = template
                .fixed_assignee()
                .and_then(|pattern| find_by_name(responsibles, pattern));
            (template, assignee)
        });
        let rotating_assignments = rotating
            .into_iter()
            .zip(responsibles.iter().cycle())
            .map(|(template, responsible)| (template, Some(responsible.id().clone())));

        fixed_assignments
            .chain(rotating_assignments)
            .map(|(template, assignee)| daily_task(template, assignee, today, clock))
            .collect()
    }
}

fn find_by_name(responsibles: &[Responsible], pattern: &str) -> Option<ResponsibleId> {
    responsibles
        .iter()
        .find(|responsible| responsible.name_matches(pattern))
        .map(|responsible| responsible.id().clone())
}

fn daily_task(
    template: &DailyTaskTemplate,
    assignee: Option<ResponsibleId>,
    today: NaiveDate,
    clock: &impl Clock,
) -> BoardServiceResult<Task> {
    let dated = TaskDetails::new(template.title())?
        .with_start_date(today)
        .with_due_date(today);
    let details = match assignee {
        Some(responsible_id) => dated.with_responsible(responsible_id),
        None => dated,
    };
    Ok(Task::new(details, clock)?)
}
