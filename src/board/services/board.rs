//! Board orchestration service.
//!
//! [`BoardService`] owns the board state and is its only writer: every
//! operation takes `&mut self`, validates before touching anything, applies
//! the change in memory and then writes the whole snapshot once. A failed
//! write is logged and the in-memory change stands.

use super::{
    BoardServiceError, BoardServiceResult, DailyTaskGenerator, MutationOutcome,
    StatusChangeOutcome,
};
use crate::board::{
    domain::{
        BoardColumn, BoardSnapshot, BoardState, BoardSummary, BoardTab, ModalMode,
        PendingStatusChange, Responsible, ResponsibleId, Task, TaskCreationPolicy, TaskDetails,
        TaskFilter, TaskId, TaskStatus, UiState, board_columns, default_quick_activities,
    },
    ports::BoardStore,
};
use crate::config::BoardConfig;
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Board state container and mutation service.
pub struct BoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    policy: TaskCreationPolicy,
    generator: DailyTaskGenerator,
    quick_activities: Vec<String>,
    state: BoardState,
}

impl<S, C> BoardService<S, C>
where
    S: BoardStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with an empty board and the built-in catalogs.
    ///
    /// Nothing is read from the store; see [`Self::open`].
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            policy: TaskCreationPolicy::default(),
            generator: DailyTaskGenerator::default(),
            quick_activities: default_quick_activities(),
            state: BoardState::default(),
        }
    }

    /// Applies the policy and catalogs from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &BoardConfig) -> Self {
        self.policy = config.creation_policy;
        self.generator = DailyTaskGenerator::new(config.daily_templates.clone());
        self.quick_activities.clone_from(&config.quick_activities);
        self
    }

    /// Creates a service configured from `config` and loads the stored
    /// board.
    pub async fn open(store: Arc<S>, clock: Arc<C>, config: &BoardConfig) -> Self {
        let mut service = Self::new(store, clock).with_config(config);
        service.reload().await;
        service
    }

    /// Replaces the board with the stored snapshot.
    ///
    /// An empty or unreadable store yields an empty board; read failures
    /// are logged, never returned.
    pub async fn reload(&mut self) {
        let snapshot = match self.store.load().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => BoardSnapshot::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load board, starting empty");
                BoardSnapshot::default()
            }
        };
        self.state = BoardState::from_snapshot(snapshot);
    }

    /// Returns the full board state.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns responsibles in insertion order.
    #[must_use]
    pub fn responsibles(&self) -> &[Responsible] {
        self.state.responsibles()
    }

    /// Returns tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    /// Returns the interaction fields.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        self.state.ui()
    }

    /// Returns the interaction fields for the host to update.
    pub const fn ui_mut(&mut self) -> &mut UiState {
        self.state.ui_mut()
    }

    /// Returns the quick activity catalog.
    #[must_use]
    pub fn quick_activities(&self) -> &[String] {
        &self.quick_activities
    }

    /// Returns today's date according to the service clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Returns the tasks passing `filter`, in board order.
    #[must_use]
    pub fn filtered_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(self.tasks())
    }

    /// Returns the filtered tasks grouped into status columns.
    #[must_use]
    pub fn columns(&self, filter: &TaskFilter) -> Vec<BoardColumn<'_>> {
        board_columns(self.tasks(), filter)
    }

    /// Returns task counts for the whole board.
    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        BoardSummary::from_tasks(self.tasks())
    }

    /// Returns unfinished tasks whose due date has passed.
    #[must_use]
    pub fn overdue_tasks(&self) -> Vec<&Task> {
        let today = self.today();
        self.tasks()
            .iter()
            .filter(|task| task.is_overdue(today))
            .collect()
    }

    /// Looks up a responsible by identifier.
    #[must_use]
    pub fn responsible(&self, id: &ResponsibleId) -> Option<&Responsible> {
        self.responsibles()
            .iter()
            .find(|responsible| responsible.id() == id)
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks().iter().find(|task| task.id() == id)
    }

    // ── Responsibles ────────────────────────────────────────────────

    /// Registers a new responsible at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the name is blank.
    pub async fn add_responsible(
        &mut self,
        name: impl Into<String> + Send,
        color: Option<String>,
    ) -> BoardServiceResult<Responsible> {
        let responsible = Responsible::new(name, color)?;
        self.state
            .snapshot_mut()
            .responsibles
            .push(responsible.clone());
        self.persist().await;
        Ok(responsible)
    }

    /// Renames a responsible and replaces its colour.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the name is blank.
    pub async fn update_responsible(
        &mut self,
        id: &ResponsibleId,
        name: impl Into<String> + Send,
        color: Option<String>,
    ) -> BoardServiceResult<MutationOutcome<Responsible>> {
        let Some(responsible) = self
            .state
            .snapshot_mut()
            .responsibles
            .iter_mut()
            .find(|responsible| responsible.id() == id)
        else {
            tracing::warn!(responsible_id = %id, "responsible to update not found");
            return Ok(MutationOutcome::NotFound);
        };
        responsible.rename(name, color)?;
        let updated = responsible.clone();
        self.persist().await;
        Ok(MutationOutcome::Applied(updated))
    }

    /// Removes a responsible that no task references.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::ResponsibleInUse`] with the number of
    /// blocking tasks when any task is assigned to the responsible.
    pub async fn delete_responsible(
        &mut self,
        id: &ResponsibleId,
    ) -> BoardServiceResult<MutationOutcome<Responsible>> {
        let task_count = self
            .tasks()
            .iter()
            .filter(|task| task.is_assigned_to(id))
            .count();
        if task_count > 0 {
            return Err(BoardServiceError::ResponsibleInUse {
                responsible_id: id.clone(),
                task_count,
            });
        }
        let responsibles = &mut self.state.snapshot_mut().responsibles;
        let Some(position) = responsibles
            .iter()
            .position(|responsible| responsible.id() == id)
        else {
            tracing::warn!(responsible_id = %id, "responsible to delete not found");
            return Ok(MutationOutcome::NotFound);
        };
        let removed = responsibles.remove(position);
        self.persist().await;
        Ok(MutationOutcome::Applied(removed))
    }

    // ── Tasks ───────────────────────────────────────────────────────

    /// Creates a task from the task dialog.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the creation policy's
    /// required fields are missing or the status needs a responsible, and
    /// [`BoardServiceError::UnknownResponsible`] for an unregistered
    /// assignee.
    pub async fn create_task(&mut self, details: TaskDetails) -> BoardServiceResult<Task> {
        self.policy.validate(&details)?;
        self.ensure_known_responsible(details.responsible_id())?;
        let task = Task::new(details, &*self.clock)?;
        self.state.snapshot_mut().tasks.push(task.clone());
        self.persist().await;
        Ok(task)
    }

    /// Creates an unassigned `Todo` task due tomorrow from a quick activity.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank.
    pub async fn create_quick_task(
        &mut self,
        title: impl Into<String> + Send,
    ) -> BoardServiceResult<Task> {
        let today = self.today();
        let due = today.checked_add_days(Days::new(1)).unwrap_or(today);
        let details = TaskDetails::new(title)?.with_due_date(due);
        let task = Task::new(details, &*self.clock)?;
        self.state.snapshot_mut().tasks.push(task.clone());
        self.persist().await;
        Ok(task)
    }

    /// Overwrites every editable field of a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the creation policy's
    /// required fields are missing or the status needs a responsible, and
    /// [`BoardServiceError::UnknownResponsible`] for an unregistered
    /// assignee.
    pub async fn update_task(
        &mut self,
        id: &TaskId,
        details: TaskDetails,
    ) -> BoardServiceResult<MutationOutcome<Task>> {
        self.policy.validate(&details)?;
        self.ensure_known_responsible(details.responsible_id())?;
        let clock = Arc::clone(&self.clock);
        let Some(task) = self.task_mut(id) else {
            tracing::warn!(task_id = %id, "task to update not found");
            return Ok(MutationOutcome::NotFound);
        };
        task.apply_details(details, &*clock)?;
        let updated = task.clone();
        self.persist().await;
        Ok(MutationOutcome::Applied(updated))
    }

    /// Removes a task.
    pub async fn delete_task(&mut self, id: &TaskId) -> MutationOutcome<Task> {
        let tasks = &mut self.state.snapshot_mut().tasks;
        let Some(position) = tasks.iter().position(|task| task.id() == id) else {
            tracing::warn!(task_id = %id, "task to delete not found");
            return MutationOutcome::NotFound;
        };
        let removed = tasks.remove(position);
        let ui = self.state.ui_mut();
        if ui
            .pending_status_change
            .as_ref()
            .is_some_and(|pending| &pending.task_id == id)
        {
            ui.pending_status_change = None;
        }
        if ui.dragged_task.as_ref() == Some(id) {
            ui.dragged_task = None;
        }
        if matches!(&ui.modal, Some(ModalMode::Edit(edited)) if edited == id) {
            ui.modal = None;
        }
        self.persist().await;
        MutationOutcome::Applied(removed)
    }

    /// Removes every task and returns how many were removed.
    ///
    /// An already empty board is left alone and nothing is written.
    pub async fn clear_board(&mut self) -> usize {
        let removed = std::mem::take(&mut self.state.snapshot_mut().tasks).len();
        if removed == 0 {
            return 0;
        }
        let ui = self.state.ui_mut();
        ui.pending_status_change = None;
        ui.dragged_task = None;
        self.persist().await;
        tracing::info!(removed, "board cleared");
        removed
    }

    /// Appends today's batch from the daily template catalog.
    ///
    /// The whole batch is appended, then written once.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::EmptyResponsibleSet`] when nobody is
    /// registered; the responsible tab is selected so the host can send the
    /// user there. Nothing is appended.
    pub async fn generate_daily_tasks(&mut self) -> BoardServiceResult<Vec<Task>> {
        let batch = match self.generator.generate(self.state.responsibles(), &*self.clock) {
            Ok(batch) => batch,
            Err(err) => {
                if matches!(err, BoardServiceError::EmptyResponsibleSet) {
                    self.state.ui_mut().active_tab = BoardTab::Responsibles;
                }
                return Err(err);
            }
        };
        self.state.snapshot_mut().tasks.extend(batch.iter().cloned());
        self.persist().await;
        tracing::info!(count = batch.len(), "daily tasks generated");
        Ok(batch)
    }

    // ── Status changes ──────────────────────────────────────────────

    /// Moves a task to `target`.
    ///
    /// When `target` needs a responsible and the task has none, nothing is
    /// changed: the request is parked in [`UiState::pending_status_change`]
    /// and [`StatusChangeOutcome::AwaitingResponsible`] is returned. Finish
    /// it with [`Self::confirm_pending_status_change`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::EmptyResponsibleSet`] when a responsible
    /// is needed but none is registered.
    pub async fn change_status(
        &mut self,
        id: &TaskId,
        target: TaskStatus,
    ) -> BoardServiceResult<StatusChangeOutcome> {
        let Some(task) = self.task(id) else {
            tracing::warn!(task_id = %id, "task to move not found");
            return Ok(StatusChangeOutcome::NotFound);
        };
        if task.status() == target {
            return Ok(StatusChangeOutcome::Unchanged);
        }
        if target.requires_responsible() && task.responsible_id().is_none() {
            if self.responsibles().is_empty() {
                return Err(BoardServiceError::EmptyResponsibleSet);
            }
            let pending = PendingStatusChange {
                task_id: id.clone(),
                target,
            };
            self.state.ui_mut().pending_status_change = Some(pending.clone());
            return Ok(StatusChangeOutcome::AwaitingResponsible(pending));
        }

        let clock = Arc::clone(&self.clock);
        let Some(task) = self.task_mut(id) else {
            return Ok(StatusChangeOutcome::NotFound);
        };
        task.move_to(target, &*clock)?;
        let moved = task.clone();
        self.persist().await;
        Ok(StatusChangeOutcome::Applied(moved))
    }

    /// Assigns a responsible and moves the task as one change.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::UnknownResponsible`] for an
    /// unregistered responsible.
    pub async fn assign_and_change_status(
        &mut self,
        id: &TaskId,
        responsible_id: ResponsibleId,
        target: TaskStatus,
    ) -> BoardServiceResult<StatusChangeOutcome> {
        self.ensure_known_responsible(Some(&responsible_id))?;
        let clock = Arc::clone(&self.clock);
        let Some(task) = self.task_mut(id) else {
            tracing::warn!(task_id = %id, "task to assign not found");
            return Ok(StatusChangeOutcome::NotFound);
        };
        task.assign_and_move(responsible_id, target, &*clock);
        let moved = task.clone();
        let ui = self.state.ui_mut();
        if ui
            .pending_status_change
            .as_ref()
            .is_some_and(|pending| &pending.task_id == id)
        {
            ui.pending_status_change = None;
        }
        self.persist().await;
        Ok(StatusChangeOutcome::Applied(moved))
    }

    /// Completes the parked status change with the chosen responsible.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::UnknownResponsible`] for an
    /// unregistered responsible, leaving the request parked, and
    /// [`BoardServiceError::NoPendingStatusChange`] when nothing is parked.
    pub async fn confirm_pending_status_change(
        &mut self,
        responsible_id: ResponsibleId,
    ) -> BoardServiceResult<StatusChangeOutcome> {
        self.ensure_known_responsible(Some(&responsible_id))?;
        let pending = self
            .state
            .ui_mut()
            .pending_status_change
            .take()
            .ok_or(BoardServiceError::NoPendingStatusChange)?;
        self.assign_and_change_status(&pending.task_id, responsible_id, pending.target)
            .await
    }

    /// Drops the parked status change, if any.
    pub fn cancel_pending_status_change(&mut self) -> Option<PendingStatusChange> {
        self.state.ui_mut().pending_status_change.take()
    }

    /// Records the task being dragged.
    pub fn begin_drag(&mut self, id: TaskId) {
        self.state.ui_mut().dragged_task = Some(id);
    }

    /// Forgets the task being dragged.
    pub fn end_drag(&mut self) {
        self.state.ui_mut().dragged_task = None;
    }

    /// Drops the dragged task onto the `target` column.
    ///
    /// # Errors
    ///
    /// Same as [`Self::change_status`].
    pub async fn drop_dragged_task(
        &mut self,
        target: TaskStatus,
    ) -> BoardServiceResult<StatusChangeOutcome> {
        let Some(id) = self.state.ui_mut().dragged_task.take() else {
            tracing::warn!("drop without a dragged task");
            return Ok(StatusChangeOutcome::NotFound);
        };
        self.change_status(&id, target).await
    }

    // ── Live updates ────────────────────────────────────────────────

    /// Subscribes to snapshots pushed by the store, if it supports it.
    #[must_use]
    pub fn subscribe(&self) -> Option<broadcast::Receiver<BoardSnapshot>> {
        self.store.subscribe()
    }

    /// Replaces responsibles and tasks with a snapshot from another writer.
    ///
    /// This is a full overwrite: local changes not yet seen by the store are
    /// lost. Interaction fields are kept and nothing is written back.
    pub fn apply_external_snapshot(&mut self, snapshot: BoardSnapshot) {
        tracing::debug!(
            responsibles = snapshot.responsibles.len(),
            tasks = snapshot.tasks.len(),
            "applying external board snapshot"
        );
        self.state.replace_snapshot(snapshot);
    }

    // ── Internals ───────────────────────────────────────────────────

    fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.state
            .snapshot_mut()
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
    }

    fn ensure_known_responsible(&self, id: Option<&ResponsibleId>) -> BoardServiceResult<()> {
        match id {
            Some(responsible_id) if self.responsible(responsible_id).is_none() => {
                Err(BoardServiceError::UnknownResponsible(responsible_id.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Writes the snapshot. Failures are logged and otherwise ignored.
    async fn persist(&self) {
        if let Err(err) = self.store.save(self.state.snapshot()).await {
            tracing::error!(error = %err, "failed to persist board");
        }
    }
}
