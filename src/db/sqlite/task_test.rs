//! Tests for SqliteTaskRepository.

use super::test_support::{make_task, seed_board, setup_db};
use crate::db::{Database, DbError, ListSequence, Priority, TaskRepository, TaskStatus};

fn ids(tasks: &[crate::db::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn task_create_and_get() {
    let db = setup_db().await;
    seed_board(&db, 0, 0).await;
    let tasks = db.tasks();

    let mut task = make_task("task0001", "lista001", "board001", 0);
    task.priority = Priority::High;
    task.status = TaskStatus::InProgress;
    task.due_date = Some("2025-06-30".to_string());
    tasks.create(&task).await.expect("Create should succeed");

    let fetched = tasks.get("task0001").await.expect("Get should succeed");
    assert_eq!(fetched.priority, Priority::High);
    assert_eq!(fetched.status, TaskStatus::InProgress);
    assert_eq!(fetched.due_date.as_deref(), Some("2025-06-30"));
    assert_eq!(fetched.board_id, "board001");
    assert!(!fetched.created_at.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn task_update_keeps_list_and_order() {
    let db = setup_db().await;
    seed_board(&db, 2, 0).await;
    let tasks = db.tasks();

    let mut task = tasks.get("taska001").await.unwrap();
    task.title = "Renamed".to_string();
    task.status = TaskStatus::Done;
    task.order = 99;
    tasks.update(&task).await.unwrap();

    let fetched = tasks.get("taska001").await.unwrap();
    assert_eq!(fetched.title, "Renamed");
    assert_eq!(fetched.status, TaskStatus::Done);
    assert_eq!(fetched.order, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn persist_sequences_moves_between_lists() {
    let db = setup_db().await;
    seed_board(&db, 3, 2).await;
    let tasks = db.tasks();

    tasks
        .persist_sequences(&[
            ListSequence {
                list_id: "lista001".to_string(),
                task_ids: vec!["taska000".to_string(), "taska002".to_string()],
            },
            ListSequence {
                list_id: "listb001".to_string(),
                task_ids: vec![
                    "taska001".to_string(),
                    "taskb000".to_string(),
                    "taskb001".to_string(),
                ],
            },
        ])
        .await
        .expect("Persist should succeed");

    let a = tasks.list_by_list("lista001").await.unwrap();
    let b = tasks.list_by_list("listb001").await.unwrap();
    assert_eq!(ids(&a), vec!["taska000", "taska002"]);
    assert_eq!(ids(&b), vec!["taska001", "taskb000", "taskb001"]);
    assert_eq!(b.iter().map(|t| t.order).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(tasks.get("taska001").await.unwrap().list_id, "listb001");
}

#[tokio::test(flavor = "multi_thread")]
async fn persist_sequences_is_all_or_nothing() {
    let db = setup_db().await;
    seed_board(&db, 2, 0).await;
    let tasks = db.tasks();

    let result = tasks
        .persist_sequences(&[ListSequence {
            list_id: "lista001".to_string(),
            task_ids: vec!["taska001".to_string(), "ghost000".to_string()],
        }])
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let a = tasks.list_by_list("lista001").await.unwrap();
    assert_eq!(ids(&a), vec!["taska000", "taska001"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn persist_sequences_rolls_back_earlier_lists() {
    let db = setup_db().await;
    seed_board(&db, 2, 1).await;
    let tasks = db.tasks();

    // taskb000 vanishes between loading the board and saving the move.
    tasks.delete("taskb000").await.unwrap();

    let result = tasks
        .persist_sequences(&[
            ListSequence {
                list_id: "lista001".to_string(),
                task_ids: vec!["taska001".to_string()],
            },
            ListSequence {
                list_id: "listb001".to_string(),
                task_ids: vec!["taska000".to_string(), "taskb000".to_string()],
            },
        ])
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let a0 = tasks.get("taska000").await.unwrap();
    assert_eq!((a0.list_id.as_str(), a0.order), ("lista001", 0));
    let a1 = tasks.get("taska001").await.unwrap();
    assert_eq!((a1.list_id.as_str(), a1.order), ("lista001", 1));
    assert!(tasks.list_by_list("listb001").await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_task_renumbers_remaining() {
    let db = setup_db().await;
    seed_board(&db, 3, 0).await;
    let tasks = db.tasks();

    tasks.delete("taska000").await.expect("Delete should succeed");

    let a = tasks.list_by_list("lista001").await.unwrap();
    assert_eq!(ids(&a), vec!["taska001", "taska002"]);
    assert_eq!(a.iter().map(|t| t.order).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(tasks.count_by_list("lista001").await.unwrap(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_nonexistent_task_returns_not_found() {
    let db = setup_db().await;
    let result = db.tasks().delete("nonexist").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_by_board_spans_lists() {
    let db = setup_db().await;
    seed_board(&db, 2, 1).await;

    let all = db.tasks().list_by_board("board001").await.unwrap();
    assert_eq!(all.len(), 3);
}
