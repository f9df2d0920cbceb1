//! Fixtures shared by the SQLite repository tests.

use crate::db::{
    Board, BoardRepository, Database, List, ListRepository, Priority, SqliteDatabase, Task,
    TaskRepository, TaskStatus, User, UserRepository,
};

pub(super) async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

pub(super) fn make_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$placeholder".to_string(),
        created_at: "2025-01-01 00:00:00".to_string(),
    }
}

pub(super) fn make_board(id: &str, owner_id: &str) -> Board {
    Board {
        id: id.to_string(),
        title: format!("Board {}", id),
        owner_id: owner_id.to_string(),
        member_ids: vec![],
        github_repo: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub(super) fn make_list(id: &str, board_id: &str, order: i64) -> List {
    List {
        id: id.to_string(),
        title: format!("List {}", id),
        board_id: board_id.to_string(),
        order,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub(super) fn make_task(id: &str, list_id: &str, board_id: &str, order: i64) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        description: String::new(),
        due_date: None,
        priority: Priority::Medium,
        status: TaskStatus::ToDo,
        list_id: list_id.to_string(),
        board_id: board_id.to_string(),
        order,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

/// Owner `user0001`, board `board001` with lists `lista001` (tasks `taska00N`, N < a_tasks)
/// and `listb001` (tasks `taskb00N`, N < b_tasks).
pub(super) async fn seed_board(db: &SqliteDatabase, a_tasks: usize, b_tasks: usize) {
    db.users()
        .create(&make_user("user0001", "owner@example.com"))
        .await
        .expect("Create user should succeed");
    db.boards()
        .create(&make_board("board001", "user0001"))
        .await
        .expect("Create board should succeed");

    for (order, (list_id, prefix, count)) in [("lista001", "taska", a_tasks), ("listb001", "taskb", b_tasks)]
        .into_iter()
        .enumerate()
    {
        db.lists()
            .create(&make_list(list_id, "board001", order as i64))
            .await
            .expect("Create list should succeed");
        for i in 0..count {
            db.tasks()
                .create(&make_task(
                    &format!("{}{:03}", prefix, i),
                    list_id,
                    "board001",
                    i as i64,
                ))
                .await
                .expect("Create task should succeed");
        }
    }
}
