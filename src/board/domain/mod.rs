//! Domain model for the household chore board.
//!
//! Responsibles, tasks and their kanban status, the daily template
//! catalogs, the persisted snapshot shape and the read-only board views.
//! No infrastructure concerns cross this boundary.

mod blank;
mod error;
mod ids;
mod policy;
mod query;
mod responsible;
mod snapshot;
mod state;
mod task;
mod template;
mod ui;

pub use error::{BoardDomainError, ParseTaskCreationPolicyError, ParseTaskStatusError};
pub use ids::{ResponsibleId, TaskId};
pub use policy::TaskCreationPolicy;
pub use query::{BoardColumn, BoardSummary, TaskFilter, board_columns, format_day_month_year};
pub use responsible::{DEFAULT_RESPONSIBLE_COLOR, Responsible};
pub use snapshot::BoardSnapshot;
pub use state::BoardState;
pub use task::{PersistedTaskData, Task, TaskDetails, TaskStatus};
pub use template::{DailyTaskTemplate, default_daily_templates, default_quick_activities};
pub use ui::{BoardTab, ModalMode, PendingStatusChange, UiState};
