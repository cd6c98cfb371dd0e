//! Given steps for board BDD scenarios.

use super::world::{BoardWorld, run_async};
use choreboard::{
    board::{
        domain::{DailyTaskTemplate, TaskDetails},
        services::BoardService,
    },
    config::BoardConfig,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::sync::Arc;

#[given("a daily catalog of {count:usize} rotating chores")]
fn rotating_catalog(world: &mut BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let daily_templates = (1..=count)
        .map(|index| DailyTaskTemplate::rotating(format!("Chore {index}")))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("build rotating templates")?;
    let config = BoardConfig {
        daily_templates,
        ..BoardConfig::default()
    };
    world.board = run_async(BoardService::open(
        Arc::clone(&world.store),
        Arc::new(world.clock),
        &config,
    ));
    Ok(())
}

#[given(r#"a responsible named "{name}""#)]
fn responsible_named(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.board.add_responsible(name, None)).wrap_err("register responsible")?;
    Ok(())
}

#[given(r#"an unassigned chore "{title}" due today"#)]
fn unassigned_chore(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let details = TaskDetails::new(title)?.with_due_date(world.today());
    run_async(world.board.create_task(details)).wrap_err("create unassigned chore")?;
    Ok(())
}

#[given(r#"a chore "{title}" assigned to "{name}""#)]
fn assigned_chore(world: &mut BoardWorld, title: String, name: String) -> Result<(), eyre::Report> {
    let details = TaskDetails::new(title)?
        .with_due_date(world.today())
        .with_responsible(world.responsible_id(&name)?);
    run_async(world.board.create_task(details)).wrap_err("create assigned chore")?;
    Ok(())
}
