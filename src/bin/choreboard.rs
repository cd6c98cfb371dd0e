//! Command-line front end for the chore board.
//!
//! Usage:
//!
//! ```text
//! choreboard [--config <path>] <command>
//! ```
//!
//! The store is chosen by the configuration file and the `CHOREBOARD_*`
//! environment variables; see [`choreboard::config`].

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use choreboard::board::{
    adapters::{file::JsonFileBoardStore, remote::RemoteBoardStore},
    domain::{
        BoardSnapshot, Responsible, ResponsibleId, Task, TaskDetails, TaskFilter, TaskStatus,
        format_day_month_year,
    },
    ports::BoardStore,
    services::{BoardService, MutationOutcome, StatusChangeOutcome},
};
use choreboard::config::{BoardConfig, StorageConfig};
use clap::{Parser, Subcommand};
use eyre::{Result, bail, eyre};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

/// Household chore board.
#[derive(Parser)]
#[command(name = "choreboard", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Manage household members.
    #[command(subcommand)]
    Responsible(ResponsibleCommand),

    /// Manage chores.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Show the board, optionally filtered.
    List {
        /// Only chores of this responsible (name or id).
        #[arg(short, long)]
        responsible: Option<String>,
        /// Case-insensitive title search.
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Append today's daily chores, rotating through responsibles.
    GenerateDaily,

    /// Remove every chore from the board.
    Clear,

    /// Print the board whenever another writer changes it.
    Watch,
}

#[derive(Subcommand)]
enum ResponsibleCommand {
    /// Register a household member.
    Add {
        /// Display name.
        name: String,
        /// Colour as a CSS hex string.
        #[arg(long)]
        color: Option<String>,
    },
    /// List household members.
    List,
    /// Remove a household member with no chores.
    Remove {
        /// Name or id.
        responsible: String,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Create a chore.
    Add {
        /// Chore title.
        title: String,
        /// Free-text description.
        #[arg(long)]
        description: Option<String>,
        /// Responsible name or id.
        #[arg(short, long)]
        responsible: Option<String>,
        /// Initial status.
        #[arg(long, default_value = "todo")]
        status: TaskStatus,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Create an unassigned chore due tomorrow from the quick catalog.
    Quick {
        /// Activity title; omit to list the catalog.
        title: Option<String>,
    },
    /// Move a chore to another column.
    Move {
        /// Chore id.
        id: String,
        /// Target status.
        status: TaskStatus,
        /// Responsible to assign when the chore has none.
        #[arg(short, long)]
        responsible: Option<String>,
    },
    /// Delete a chore.
    Remove {
        /// Chore id.
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("choreboard=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => BoardConfig::from_file(path)?,
        None => BoardConfig::default(),
    }
    .with_env_overrides()?;

    match config.storage.remote_store_config() {
        Some(remote) => {
            let store = Arc::new(RemoteBoardStore::new(remote));
            run(store, &config, cli.command).await
        }
        None => {
            let StorageConfig::File { path } = &config.storage else {
                bail!("unsupported storage backend");
            };
            let store = Arc::new(JsonFileBoardStore::new(path.as_str()));
            run(store, &config, cli.command).await
        }
    }
}

async fn run<S: BoardStore>(store: Arc<S>, config: &BoardConfig, command: Command) -> Result<()> {
    let mut board = BoardService::open(store, Arc::new(DefaultClock), config).await;
    let mut out = io::stdout().lock();

    match command {
        Command::Responsible(command) => run_responsible(&mut board, command, &mut out).await,
        Command::Task(command) => run_task(&mut board, command, &mut out).await,
        Command::List {
            responsible,
            search,
        } => {
            let mut filter = TaskFilter::new();
            if let Some(reference) = responsible {
                filter = filter.with_responsible(resolve_responsible(&board, &reference)?);
            }
            if let Some(text) = search {
                filter = filter.with_search(text);
            }
            print_board(&board, &filter, &mut out)
        }
        Command::GenerateDaily => {
            let batch = board.generate_daily_tasks().await?;
            writeln!(out, "generated {} chores", batch.len())?;
            for task in &batch {
                print_task(&board, task, &mut out)?;
            }
            Ok(())
        }
        Command::Clear => {
            let removed = board.clear_board().await;
            writeln!(out, "removed {removed} chores")?;
            Ok(())
        }
        Command::Watch => watch(&mut board, &mut out).await,
    }
}

async fn run_responsible<S: BoardStore>(
    board: &mut BoardService<S, DefaultClock>,
    command: ResponsibleCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ResponsibleCommand::Add { name, color } => {
            let responsible = board.add_responsible(name, color).await?;
            writeln!(out, "{}  {}", responsible.id(), responsible.name())?;
        }
        ResponsibleCommand::List => {
            for responsible in board.responsibles() {
                let assigned = board
                    .tasks()
                    .iter()
                    .filter(|task| task.is_assigned_to(responsible.id()))
                    .count();
                writeln!(
                    out,
                    "{}  {}  {}  {assigned} chores",
                    responsible.id(),
                    responsible.name(),
                    responsible.display_color(),
                )?;
            }
        }
        ResponsibleCommand::Remove { responsible } => {
            let id = resolve_responsible(board, &responsible)?;
            match board.delete_responsible(&id).await? {
                MutationOutcome::Applied(removed) => writeln!(out, "removed {}", removed.name())?,
                MutationOutcome::NotFound => bail!("responsible {id} not found"),
            }
        }
    }
    Ok(())
}

async fn run_task<S: BoardStore>(
    board: &mut BoardService<S, DefaultClock>,
    command: TaskCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        TaskCommand::Add {
            title,
            description,
            responsible,
            status,
            start,
            due,
        } => {
            let mut details = TaskDetails::new(title)?.with_status(status);
            if let Some(text) = description {
                details = details.with_description(text);
            }
            if let Some(reference) = responsible {
                details = details.with_responsible(resolve_responsible(board, &reference)?);
            }
            if let Some(date) = start {
                details = details.with_start_date(date);
            }
            if let Some(date) = due {
                details = details.with_due_date(date);
            }
            let task = board.create_task(details).await?;
            print_task(board, &task, out)?;
        }
        TaskCommand::Quick { title: None } => {
            for activity in board.quick_activities() {
                writeln!(out, "{activity}")?;
            }
        }
        TaskCommand::Quick { title: Some(title) } => {
            let task = board.create_quick_task(title).await?;
            print_task(board, &task, out)?;
        }
        TaskCommand::Move {
            id,
            status,
            responsible,
        } => {
            let task_id = id.parse()?;
            let outcome = match board.change_status(&task_id, status).await? {
                StatusChangeOutcome::AwaitingResponsible(pending) => {
                    let Some(reference) = responsible else {
                        bail!(
                            "chore {} needs a responsible before moving to {}; pass --responsible",
                            pending.task_id,
                            pending.target,
                        );
                    };
                    let responsible_id = resolve_responsible(board, &reference)?;
                    board.confirm_pending_status_change(responsible_id).await?
                }
                other => other,
            };
            match outcome {
                StatusChangeOutcome::Applied(task) => print_task(board, &task, out)?,
                StatusChangeOutcome::Unchanged => writeln!(out, "already {status}")?,
                StatusChangeOutcome::NotFound => bail!("chore {task_id} not found"),
                StatusChangeOutcome::AwaitingResponsible(pending) => {
                    bail!("chore {} still needs a responsible", pending.task_id);
                }
            }
        }
        TaskCommand::Remove { id } => match board.delete_task(&id.parse()?).await {
            MutationOutcome::Applied(task) => writeln!(out, "removed {}", task.title())?,
            MutationOutcome::NotFound => bail!("chore {id} not found"),
        },
    }
    Ok(())
}

async fn watch<S: BoardStore>(
    board: &mut BoardService<S, DefaultClock>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(mut changes) = board.subscribe() else {
        bail!("the configured store does not publish changes");
    };
    print_board(board, &TaskFilter::new(), out)?;
    loop {
        let snapshot: BoardSnapshot = tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            received = changes.recv() => match received {
                Ok(snapshot) => snapshot,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "board updates skipped");
                    continue;
                }
                Err(RecvError::Closed) => return Ok(()),
            },
        };
        board.apply_external_snapshot(snapshot);
        writeln!(out)?;
        print_board(board, &TaskFilter::new(), out)?;
    }
}

fn resolve_responsible<S: BoardStore>(
    board: &BoardService<S, DefaultClock>,
    reference: &str,
) -> Result<ResponsibleId> {
    let wanted = reference.trim().to_lowercase();
    board
        .responsibles()
        .iter()
        .find(|responsible| {
            responsible.id().as_str() == reference.trim()
                || responsible.name().to_lowercase() == wanted
        })
        .map(|responsible| responsible.id().clone())
        .ok_or_else(|| eyre!("no responsible named {reference}"))
}

fn responsible_name<'a, S: BoardStore>(
    board: &'a BoardService<S, DefaultClock>,
    task: &Task,
) -> &'a str {
    task.responsible_id()
        .and_then(|id| board.responsible(id))
        .map_or("-", Responsible::name)
}

fn print_task<S: BoardStore>(
    board: &BoardService<S, DefaultClock>,
    task: &Task,
    out: &mut impl Write,
) -> Result<()> {
    let due = task
        .due_date()
        .map_or_else(|| "-".to_owned(), format_day_month_year);
    let overdue = if task.is_overdue(board.today()) {
        "  (overdue)"
    } else {
        ""
    };
    writeln!(
        out,
        "  {}  {}  [{}]  due {due}{overdue}",
        task.id(),
        task.title(),
        responsible_name(board, task),
    )?;
    Ok(())
}

fn print_board<S: BoardStore>(
    board: &BoardService<S, DefaultClock>,
    filter: &TaskFilter,
    out: &mut impl Write,
) -> Result<()> {
    let summary = board.summary();
    writeln!(
        out,
        "{} chores: {} to do, {} doing, {} done",
        summary.total, summary.todo, summary.doing, summary.done,
    )?;
    for column in board.columns(filter) {
        writeln!(out, "{} ({})", column.status, column.tasks.len())?;
        for task in column.tasks {
            print_task(board, task, out)?;
        }
    }
    Ok(())
}
