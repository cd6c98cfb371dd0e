//! Shared world state for board BDD scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use choreboard::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{Responsible, ResponsibleId, Task},
    services::{BoardService, BoardServiceResult, MutationOutcome, StatusChangeOutcome},
};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to noon UTC on a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardStore, FixedClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub store: Arc<InMemoryBoardStore>,
    pub clock: FixedClock,
    pub board: TestBoardService,
    pub last_generation: Option<BoardServiceResult<Vec<Task>>>,
    pub last_status_change: Option<BoardServiceResult<StatusChangeOutcome>>,
    pub last_removal: Option<BoardServiceResult<MutationOutcome<Responsible>>>,
}

impl BoardWorld {
    /// Creates a world with an empty board on a fixed day.
    #[must_use]
    pub fn new() -> Self {
        let clock = FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        );
        let store = Arc::new(InMemoryBoardStore::new());
        let board = BoardService::new(Arc::clone(&store), Arc::new(clock));
        Self {
            store,
            clock,
            board,
            last_generation: None,
            last_status_change: None,
            last_removal: None,
        }
    }

    /// Returns the scenario's current date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.0.date_naive()
    }

    /// Finds a registered responsible by exact name.
    pub fn responsible_id(&self, name: &str) -> eyre::Result<ResponsibleId> {
        self.board
            .responsibles()
            .iter()
            .find(|responsible| responsible.name() == name)
            .map(|responsible| responsible.id().clone())
            .ok_or_else(|| eyre::eyre!("no responsible named {name} in scenario world"))
    }

    /// Finds a task by exact title.
    pub fn task_titled(&self, title: &str) -> eyre::Result<&Task> {
        self.board
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no chore titled {title} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
