//! Tests for SqliteBoardRepository.

use super::test_support::{make_board, make_user, seed_board, setup_db};
use crate::db::{BoardRepository, Database, DbError, GithubRepo, UserRepository};

#[tokio::test(flavor = "multi_thread")]
async fn board_create_makes_owner_a_member() {
    let db = setup_db().await;
    db.users()
        .create(&make_user("user0001", "owner@example.com"))
        .await
        .unwrap();

    let created = db
        .boards()
        .create(&make_board("board001", "user0001"))
        .await
        .expect("Create should succeed");
    assert_eq!(created.member_ids, vec!["user0001".to_string()]);

    let fetched = db.boards().get("board001").await.unwrap();
    assert_eq!(fetched.owner_id, "user0001");
    assert_eq!(fetched.member_ids, vec!["user0001".to_string()]);
    assert!(fetched.github_repo.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn board_list_for_user_includes_memberships() {
    let db = setup_db().await;
    let users = db.users();
    users.create(&make_user("user0001", "a@example.com")).await.unwrap();
    users.create(&make_user("user0002", "b@example.com")).await.unwrap();
    users.create(&make_user("user0003", "c@example.com")).await.unwrap();

    let boards = db.boards();
    boards.create(&make_board("board001", "user0001")).await.unwrap();
    boards.create(&make_board("board002", "user0002")).await.unwrap();
    boards.add_member("board002", "user0001").await.unwrap();

    let for_one = boards.list_for_user("user0001").await.unwrap();
    assert_eq!(for_one.len(), 2);

    let for_three = boards.list_for_user("user0003").await.unwrap();
    assert!(for_three.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn board_add_member_is_idempotent() {
    let db = setup_db().await;
    db.users().create(&make_user("user0001", "a@example.com")).await.unwrap();
    db.users().create(&make_user("user0002", "b@example.com")).await.unwrap();
    let boards = db.boards();
    boards.create(&make_board("board001", "user0001")).await.unwrap();

    boards.add_member("board001", "user0002").await.unwrap();
    boards.add_member("board001", "user0002").await.unwrap();

    let board = boards.get("board001").await.unwrap();
    assert_eq!(board.member_ids.len(), 2);

    boards.remove_member("board001", "user0002").await.unwrap();
    let board = boards.get("board001").await.unwrap();
    assert_eq!(board.member_ids, vec!["user0001".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn board_update_persists_github_link() {
    let db = setup_db().await;
    db.users().create(&make_user("user0001", "a@example.com")).await.unwrap();
    let boards = db.boards();
    let mut board = boards.create(&make_board("board001", "user0001")).await.unwrap();

    board.title = "Renamed".to_string();
    board.github_repo = Some(GithubRepo {
        owner: "octocat".to_string(),
        name: "hello-world".to_string(),
        connected: true,
    });
    boards.update(&board).await.expect("Update should succeed");

    let fetched = boards.get("board001").await.unwrap();
    assert_eq!(fetched.title, "Renamed");
    assert_eq!(fetched.github_repo, board.github_repo);
}

#[tokio::test(flavor = "multi_thread")]
async fn board_delete_cascades_to_lists_and_tasks() {
    let db = setup_db().await;
    seed_board(&db, 3, 1).await;

    db.boards().delete("board001").await.expect("Delete should succeed");

    let lists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM list WHERE board_id = 'board001'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    let tasks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM task WHERE board_id = 'board001'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(lists, 0);
    assert_eq!(tasks, 0);

    let result = db.boards().get("board001").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn board_delete_nonexistent_returns_not_found() {
    let db = setup_db().await;
    let result = db.boards().delete("nonexist").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
