//! Tests for SqliteUserRepository.

use super::test_support::{make_user, setup_db};
use crate::db::{Database, DbError, UserRepository};

#[tokio::test(flavor = "multi_thread")]
async fn user_create_and_get() {
    let db = setup_db().await;
    let users = db.users();

    users
        .create(&make_user("user0001", "ada@example.com"))
        .await
        .expect("Create should succeed");

    let user = users.get("user0001").await.expect("Get should succeed");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.created_at, "2025-01-01 00:00:00");

    let by_email = users
        .get_by_email("ada@example.com")
        .await
        .expect("Lookup should succeed");
    assert_eq!(by_email.map(|u| u.id), Some("user0001".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn user_duplicate_email_rejected() {
    let db = setup_db().await;
    let users = db.users();

    users
        .create(&make_user("user0001", "ada@example.com"))
        .await
        .unwrap();
    let result = users.create(&make_user("user0002", "ada@example.com")).await;

    assert!(matches!(result, Err(DbError::AlreadyExists { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn user_get_nonexistent_returns_not_found() {
    let db = setup_db().await;
    let result = db.users().get("nonexist").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn session_resolves_to_user() {
    let db = setup_db().await;
    let users = db.users();
    users
        .create(&make_user("user0001", "ada@example.com"))
        .await
        .unwrap();

    users
        .create_session("user0001", "digest-1")
        .await
        .expect("Create session should succeed");

    let found = users.find_by_session("digest-1").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some("user0001".to_string()));

    let missing = users.find_by_session("digest-2").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn summaries_follow_requested_order_and_skip_unknown() {
    let db = setup_db().await;
    let users = db.users();
    users.create(&make_user("user0001", "a@example.com")).await.unwrap();
    users.create(&make_user("user0002", "b@example.com")).await.unwrap();

    let summaries = users
        .summaries(&[
            "user0002".to_string(),
            "ghost000".to_string(),
            "user0001".to_string(),
        ])
        .await
        .unwrap();

    let emails: Vec<_> = summaries.iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, vec!["b@example.com", "a@example.com"]);
}
