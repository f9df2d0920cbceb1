//! Domain models for the board database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 8-character hex ID type used for all entities.
pub type Id = String;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    /// PHC-formatted argon2 hash. Never leaves the server.
    pub password_hash: String,
    pub created_at: String,
}

/// Public identity of a user: name and email only, no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    #[schema(example = "a1b2c3d4")]
    pub id: Id,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
        }
    }
}

/// GitHub repository linked to a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GithubRepo {
    #[schema(example = "octocat")]
    pub owner: String,
    #[schema(example = "hello-world")]
    pub name: String,
    pub connected: bool,
}

/// Top-level container owned by one user and shared with members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: Id,
    pub title: String,
    pub owner_id: Id,
    /// Always contains `owner_id`.
    pub member_ids: Vec<Id>,
    pub github_repo: Option<GithubRepo>,
    pub created_at: String,
    pub updated_at: String,
}

/// Ordered column within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct List {
    #[schema(example = "e5f6a7b8")]
    pub id: Id,
    #[schema(example = "In Progress")]
    pub title: String,
    pub board_id: Id,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// A unit of work belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    #[schema(example = "a1b2c3d4")]
    pub id: Id,
    #[schema(example = "Write release notes")]
    pub title: String,
    pub description: String,
    #[schema(example = "2025-06-30")]
    pub due_date: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub list_id: Id,
    /// Denormalized copy of the owning list's board.
    pub board_id: Id,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Priority::Low),
            "Medium" => Ok(Priority::Medium),
            "High" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Status of a task. Independent of the list the task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Archived,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::ToDo => write!(f, "To Do"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Done => write!(f, "Done"),
            TaskStatus::Archived => write!(f, "Archived"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(TaskStatus::ToDo),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Done" => Ok(TaskStatus::Done),
            "Archived" => Ok(TaskStatus::Archived),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}
