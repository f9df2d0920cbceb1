//! Tests for SQLite database connection and migrations.

use crate::db::{Database, SqliteDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    for table in [
        "_sqlx_migrations",
        "board",
        "board_member",
        "list",
        "session",
        "task",
        "user",
    ] {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.migrate().await.expect("Second migration should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_keys_are_enforced() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let result = sqlx::query(
        "INSERT INTO list (id, title, board_id, \"order\", created_at, updated_at)
         VALUES ('list0001', 'Orphan', 'missing0', 0, '2025-01-01 00:00:00', '2025-01-01 00:00:00')",
    )
    .execute(db.pool())
    .await;

    assert!(result.is_err(), "list without board should be rejected");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mrello.db");

    let db = SqliteDatabase::open(&path).await.expect("Open should succeed");
    db.migrate().await.expect("Migration should succeed");

    assert!(path.exists());
}
