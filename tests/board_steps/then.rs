//! Then steps for board BDD scenarios.

use super::world::BoardWorld;
use choreboard::board::{
    domain::{BoardTab, TaskStatus},
    services::{BoardServiceError, StatusChangeOutcome},
};
use rstest_bdd_macros::then;

#[then("{count:usize} chores are added to the board")]
fn chores_added(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let batch = world
        .last_generation
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing generation result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected generation failure: {err}"))?;
    if batch.len() != count || world.board.tasks().len() != count {
        return Err(eyre::eyre!(
            "expected {count} chores, generated {} and board holds {}",
            batch.len(),
            world.board.tasks().len()
        ));
    }
    Ok(())
}

#[then(r#"the chores are assigned in order to "{names}""#)]
fn chores_assigned_in_order(world: &BoardWorld, names: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let actual: Vec<&str> = world
        .board
        .tasks()
        .iter()
        .map(|task| {
            task.responsible_id()
                .and_then(|id| world.board.responsible(id))
                .map_or("", |responsible| responsible.name())
        })
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected assignees {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("every chore is due today")]
fn every_chore_due_today(world: &BoardWorld) -> Result<(), eyre::Report> {
    let today = world.today();
    let all_today = world.board.tasks().iter().all(|task| {
        task.status() == TaskStatus::Todo
            && task.start_date() == Some(today)
            && task.due_date() == Some(today)
    });
    if !all_today {
        return Err(eyre::eyre!("expected every chore to start and end on {today}"));
    }
    Ok(())
}

#[then("generation is refused for lack of responsibles")]
fn generation_refused(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_generation.as_ref() {
        Some(Err(BoardServiceError::EmptyResponsibleSet)) => Ok(()),
        other => Err(eyre::eyre!(
            "expected an empty responsible set error, found {other:?}"
        )),
    }
}

#[then("the responsible tab is selected")]
fn responsible_tab_selected(world: &BoardWorld) -> Result<(), eyre::Report> {
    if world.board.ui().active_tab != BoardTab::Responsibles {
        return Err(eyre::eyre!(
            "expected the responsible tab, found {:?}",
            world.board.ui().active_tab
        ));
    }
    Ok(())
}

#[then("the board has no chores")]
fn board_has_no_chores(world: &BoardWorld) -> Result<(), eyre::Report> {
    if !world.board.tasks().is_empty() {
        return Err(eyre::eyre!(
            "expected an empty board, found {} chores",
            world.board.tasks().len()
        ));
    }
    Ok(())
}

#[then(r#"the chore "{title}" is assigned to "{name}""#)]
fn chore_assigned_to(world: &BoardWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let expected = world.responsible_id(&name)?;
    let task = world.task_titled(&title)?;
    if task.responsible_id() != Some(&expected) {
        return Err(eyre::eyre!(
            "expected {title} to be assigned to {name}, found {:?}",
            task.responsible_id()
        ));
    }
    Ok(())
}

#[then(r#"the chore "{title}" is unassigned"#)]
fn chore_unassigned(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    if let Some(responsible_id) = task.responsible_id() {
        return Err(eyre::eyre!(
            "expected {title} to be unassigned, found {responsible_id}"
        ));
    }
    Ok(())
}

#[then("the move waits for a responsible")]
fn move_waits(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_status_change.as_ref() {
        Some(Ok(StatusChangeOutcome::AwaitingResponsible(_)))
            if world.board.ui().pending_status_change.is_some() =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected the move to wait for a responsible, found {other:?}"
        )),
    }
}

#[then(r#"the chore "{title}" is in "{status}""#)]
fn chore_in_status(world: &BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected: TaskStatus = status.parse()?;
    let task = world.task_titled(&title)?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected {title} in {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("removal is blocked by {count:usize} chore")]
fn removal_blocked(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    match world.last_removal.as_ref() {
        Some(Err(BoardServiceError::ResponsibleInUse { task_count, .. })) if *task_count == count => {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected removal blocked by {count} chore(s), found {other:?}"
        )),
    }
}
