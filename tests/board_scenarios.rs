//! Behaviour tests for daily generation and deferred assignment.

mod board_steps;

use board_steps::world::{BoardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/daily_generation.feature",
    name = "Rotating chores are spread across responsibles"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rotating_chores_are_spread(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_generation.feature",
    name = "Generation needs a responsible"
)]
#[tokio::test(flavor = "multi_thread")]
async fn generation_needs_a_responsible(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/daily_generation.feature",
    name = "Fixed chores go to their named responsible"
)]
#[tokio::test(flavor = "multi_thread")]
async fn fixed_chores_follow_their_responsible(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/deferred_assignment.feature",
    name = "Moving an unassigned chore asks for a responsible"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_move_asks_for_responsible(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/deferred_assignment.feature",
    name = "A responsible with chores cannot be removed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn responsible_with_chores_is_kept(world: BoardWorld) {
    let _ = world;
}
