//! The nested board view returned to clients: board, lists, tasks.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::order::{Ordered, sort_by_order};
use crate::db::{Board, GithubRepo, Id, List, ListSequence, Task, UserSummary};

/// A board with its lists and each list's tasks, every level sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BoardAggregate {
    #[schema(example = "a1b2c3d4")]
    pub id: Id,
    #[schema(example = "Release 1.0")]
    pub title: String,
    pub owner: UserSummary,
    pub members: Vec<UserSummary>,
    pub github_repo: Option<GithubRepo>,
    pub lists: Vec<ListAggregate>,
    pub created_at: String,
    pub updated_at: String,
}

/// Board fields and people, without lists. Used for board listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BoardSummary {
    #[schema(example = "a1b2c3d4")]
    pub id: Id,
    #[schema(example = "Release 1.0")]
    pub title: String,
    pub owner: UserSummary,
    pub members: Vec<UserSummary>,
    pub github_repo: Option<GithubRepo>,
    pub created_at: String,
    pub updated_at: String,
}

impl BoardSummary {
    pub fn new(board: Board, owner: UserSummary, members: Vec<UserSummary>) -> Self {
        Self {
            id: board.id,
            title: board.title,
            owner,
            members,
            github_repo: board.github_repo,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

/// A list and its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListAggregate {
    #[schema(example = "e5f6a7b8")]
    pub id: Id,
    #[schema(example = "In Progress")]
    pub title: String,
    pub board_id: Id,
    pub order: i64,
    pub tasks: Vec<Task>,
}

impl Ordered for ListAggregate {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl BoardAggregate {
    /// Build the aggregate from flat records. Tasks whose list is not among
    /// `lists` are dropped.
    pub fn assemble(
        board: Board,
        owner: UserSummary,
        members: Vec<UserSummary>,
        lists: Vec<List>,
        tasks: Vec<Task>,
    ) -> Self {
        let mut lists: Vec<ListAggregate> = lists
            .into_iter()
            .map(|l| ListAggregate {
                id: l.id,
                title: l.title,
                board_id: l.board_id,
                order: l.order,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if let Some(list) = lists.iter_mut().find(|l| l.id == task.list_id) {
                list.tasks.push(task);
            }
        }

        sort_by_order(&mut lists);
        for list in &mut lists {
            sort_by_order(&mut list.tasks);
        }

        Self {
            id: board.id,
            title: board.title,
            owner,
            members,
            github_repo: board.github_repo,
            lists,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }

    pub fn list(&self, list_id: &str) -> Option<&ListAggregate> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// Find a task anywhere on the board.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.lists
            .iter()
            .flat_map(|l| l.tasks.iter())
            .find(|t| t.id == task_id)
    }

    /// Current task-reference sequence of a list.
    pub fn sequence(&self, list_id: &str) -> Option<ListSequence> {
        self.list(list_id).map(|l| ListSequence {
            list_id: l.id.clone(),
            task_ids: l.tasks.iter().map(|t| t.id.clone()).collect(),
        })
    }
}
