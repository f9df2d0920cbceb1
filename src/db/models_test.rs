//! Tests for domain models.

use std::str::FromStr;

use crate::db::models::*;

#[test]
fn task_status_uses_display_labels_on_the_wire() {
    let todo: TaskStatus = serde_json::from_str("\"To Do\"").unwrap();
    assert_eq!(todo, TaskStatus::ToDo);

    let in_progress: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
    assert_eq!(in_progress, TaskStatus::InProgress);

    assert_eq!(
        serde_json::to_string(&TaskStatus::InProgress).unwrap(),
        "\"In Progress\""
    );
}

#[test]
fn task_status_display_matches_database_format() {
    for status in [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Archived,
    ] {
        assert_eq!(TaskStatus::from_str(&status.to_string()), Ok(status));
    }
}

#[test]
fn defaults_are_medium_and_to_do() {
    assert_eq!(Priority::default(), Priority::Medium);
    assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
}

#[test]
fn unknown_priority_is_rejected() {
    assert!(Priority::from_str("Urgent").is_err());
    assert!(Priority::from_str("low").is_err());
}

#[test]
fn user_summary_drops_credentials() {
    let user = User {
        id: "u0000001".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "$argon2id$secret".to_string(),
        created_at: "2025-01-01 00:00:00".to_string(),
    };

    let summary = UserSummary::from(&user);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    assert!(json.get("password_hash").is_none());
}
