//! Filtering, grouping and summary views.

use super::FixedClock;
use crate::board::domain::{
    BoardSummary, ResponsibleId, Task, TaskDetails, TaskFilter, TaskStatus, board_columns,
    format_day_month_year,
};
use chrono::NaiveDate;
use rstest::{fixture, rstest};

struct Board {
    ana: ResponsibleId,
    bruno: ResponsibleId,
    tasks: Vec<Task>,
}

#[fixture]
fn board() -> Board {
    let clock = FixedClock::on(2025, 3, 10);
    let ana = ResponsibleId::new();
    let bruno = ResponsibleId::new();
    let task = |title: &str, responsible: Option<&ResponsibleId>, status: TaskStatus| {
        let details = TaskDetails::new(title).expect("valid").with_status(status);
        let assigned = match responsible {
            Some(id) => details.with_responsible(id.clone()),
            None => details,
        };
        Task::new(assigned, &clock).expect("valid task")
    };
    let tasks = vec![
        task("Lavar panelas", Some(&ana), TaskStatus::Todo),
        task("Lavar potes", Some(&bruno), TaskStatus::Doing),
        task("Aspirar Sala", None, TaskStatus::Todo),
        task("Lavar travessas", Some(&ana), TaskStatus::Done),
    ];
    Board { ana, bruno, tasks }
}

fn titles<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
    tasks.iter().map(|task| task.title()).collect()
}

#[rstest]
fn empty_filter_keeps_everything_in_order(board: Board) {
    let visible = TaskFilter::new().apply(&board.tasks);
    assert_eq!(
        titles(&visible),
        ["Lavar panelas", "Lavar potes", "Aspirar Sala", "Lavar travessas"]
    );
}

#[rstest]
fn responsible_filter_excludes_unassigned_tasks(board: Board) {
    let visible = TaskFilter::new()
        .with_responsible(board.ana.clone())
        .apply(&board.tasks);
    assert_eq!(titles(&visible), ["Lavar panelas", "Lavar travessas"]);
}

#[rstest]
#[case("LAVAR", 3)]
#[case("  potes ", 1)]
#[case("janela", 0)]
#[case("", 4)]
fn search_is_case_insensitive_substring(board: Board, #[case] search: &str, #[case] expected: usize) {
    let visible = TaskFilter::new().with_search(search).apply(&board.tasks);
    assert_eq!(visible.len(), expected);
}

#[rstest]
fn filters_combine(board: Board) {
    let visible = TaskFilter::new()
        .with_responsible(board.bruno.clone())
        .with_search("panelas")
        .apply(&board.tasks);
    assert!(visible.is_empty());
}

#[rstest]
fn columns_follow_status_order(board: Board) {
    let columns = board_columns(&board.tasks, &TaskFilter::new());

    let shape: Vec<(TaskStatus, Vec<&str>)> = columns
        .iter()
        .map(|column| (column.status, titles(&column.tasks)))
        .collect();
    assert_eq!(
        shape,
        [
            (TaskStatus::Todo, vec!["Lavar panelas", "Aspirar Sala"]),
            (TaskStatus::Doing, vec!["Lavar potes"]),
            (TaskStatus::Done, vec!["Lavar travessas"]),
        ]
    );
}

#[rstest]
fn summary_counts_each_status(board: Board) {
    assert_eq!(
        BoardSummary::from_tasks(&board.tasks),
        BoardSummary {
            total: 4,
            todo: 2,
            doing: 1,
            done: 1,
        }
    );
}

#[rstest]
fn dates_render_day_first() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
    assert_eq!(format_day_month_year(date), "07/03/2025");
}
