//! JSON file board store tests.

use camino::Utf8PathBuf;
use choreboard::board::{
    adapters::file::JsonFileBoardStore,
    domain::{BoardSnapshot, Responsible},
    ports::{BoardStore, BoardStoreError},
};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("temporary directory");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    Workspace { _dir: dir, root }
}

fn snapshot() -> BoardSnapshot {
    BoardSnapshot {
        responsibles: vec![Responsible::new("Euclides", None).expect("valid responsible")],
        ..BoardSnapshot::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_loads_as_absent(workspace: Workspace) {
    let store = JsonFileBoardStore::new(workspace.root.join("absent/board.json"));

    let loaded = store.load().await.expect("missing file is not an error");

    assert_eq!(loaded, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_snapshot_loads_back(workspace: Workspace) {
    let store = JsonFileBoardStore::new(workspace.root.join("nested/dir/board.json"));
    let expected = snapshot();

    store.save(&expected).await.expect("save succeeds");
    let loaded = store.load().await.expect("load succeeds");

    assert_eq!(loaded, Some(expected));
    assert!(!workspace.root.join("nested/dir/.board.json.tmp").exists());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_replaces_the_previous_document(workspace: Workspace) {
    let store = JsonFileBoardStore::new(workspace.root.join("board.json"));
    store.save(&snapshot()).await.expect("first save");

    store
        .save(&BoardSnapshot::default())
        .await
        .expect("second save");

    let raw = std::fs::read_to_string(store.path()).expect("document exists");
    assert_eq!(
        raw,
        r#"{"responsaveis":[],"tarefas":[],"distribuicaoHistorico":{}}"#
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_file_loads_as_absent(workspace: Workspace) {
    let path = workspace.root.join("board.json");
    std::fs::write(&path, "  \n").expect("write blank file");

    let loaded = JsonFileBoardStore::new(path).load().await.expect("load succeeds");

    assert_eq!(loaded, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_file_is_reported_as_malformed(workspace: Workspace) {
    let path = workspace.root.join("board.json");
    std::fs::write(&path, "{\"tarefas\":").expect("write corrupt file");

    let result = JsonFileBoardStore::new(path).load().await;

    assert!(matches!(result, Err(BoardStoreError::Malformed(_))));
}
