//! In-memory board builders for unit tests.

use super::aggregate::{BoardAggregate, ListAggregate};
use crate::db::{Priority, Task, TaskStatus, UserSummary};

pub(crate) fn owner() -> UserSummary {
    UserSummary {
        id: "owner001".to_string(),
        name: "Owner".to_string(),
        email: "owner@example.com".to_string(),
    }
}

pub(crate) fn task(id: &str, list_id: &str, order: usize) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        description: String::new(),
        due_date: None,
        priority: Priority::Medium,
        status: TaskStatus::ToDo,
        list_id: list_id.to_string(),
        board_id: "board001".to_string(),
        order: order as i64,
        created_at: "2025-01-01 00:00:00".to_string(),
        updated_at: "2025-01-01 00:00:00".to_string(),
    }
}

/// Board `board001` with the given lists (id, task ids) in order.
pub(crate) fn board_with(lists: &[(&str, &[&str])]) -> BoardAggregate {
    BoardAggregate {
        id: "board001".to_string(),
        title: "Test Board".to_string(),
        owner: owner(),
        members: vec![owner()],
        github_repo: None,
        lists: lists
            .iter()
            .enumerate()
            .map(|(order, (list_id, task_ids))| ListAggregate {
                id: list_id.to_string(),
                title: format!("List {}", list_id),
                board_id: "board001".to_string(),
                order: order as i64,
                tasks: task_ids
                    .iter()
                    .enumerate()
                    .map(|(i, id)| task(id, list_id, i))
                    .collect(),
            })
            .collect(),
        created_at: "2025-01-01 00:00:00".to_string(),
        updated_at: "2025-01-01 00:00:00".to_string(),
    }
}
