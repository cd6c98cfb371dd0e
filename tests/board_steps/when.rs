//! When steps for board BDD scenarios.

use super::world::{BoardWorld, run_async};
use choreboard::board::domain::TaskStatus;
use rstest_bdd_macros::when;

#[when("the daily chores are generated")]
fn generate_daily_chores(world: &mut BoardWorld) {
    world.last_generation = Some(run_async(world.board.generate_daily_tasks()));
}

#[when(r#"the chore "{title}" is moved to "{status}""#)]
fn move_chore(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let target: TaskStatus = status.parse()?;
    let id = world.task_titled(&title)?.id().clone();
    world.last_status_change = Some(run_async(world.board.change_status(&id, target)));
    Ok(())
}

#[when(r#""{name}" is chosen as responsible"#)]
fn choose_responsible(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let responsible_id = world.responsible_id(&name)?;
    world.last_status_change = Some(run_async(
        world.board.confirm_pending_status_change(responsible_id),
    ));
    Ok(())
}

#[when(r#"the responsible "{name}" is removed"#)]
fn remove_responsible(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let responsible_id = world.responsible_id(&name)?;
    world.last_removal = Some(run_async(world.board.delete_responsible(&responsible_id)));
    Ok(())
}
