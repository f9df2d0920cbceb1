//! Board, list and task operations on top of a [`Database`].
//!
//! Every mutating entry point loads the owning board first and runs the
//! capability check from [`access`](super::access) before touching anything.

use chrono::{DateTime, NaiveDate};
use tracing::{debug, info, warn};

use super::access::{self, Capability};
use super::aggregate::{BoardAggregate, BoardSummary};
use super::error::{BoardError, BoardResult};
use super::moves::{TaskMove, apply_move};
use super::order::{reposition, verify_integrity};
use crate::db::utils::generate_entity_id;
use crate::db::{
    Board, BoardRepository, Database, GithubRepo, List, ListRepository, Priority, Task,
    TaskRepository, TaskStatus, UserRepository, UserSummary,
};

/// Lists every new board starts with.
pub const DEFAULT_LISTS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Fields for a new task. Missing optional fields take their defaults.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

/// Edits to a task. `None` leaves a field as it is; an empty `due_date` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

pub struct BoardService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> BoardService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// The nested board view, lists and tasks sorted by order.
    pub async fn load_board(&self, board_id: &str, principal: &str) -> BoardResult<BoardAggregate> {
        let board = self
            .authorized_board(board_id, principal, Capability::Collaborate, "view this board")
            .await?;
        self.assemble(board).await
    }

    /// Boards the principal owns or is a member of.
    pub async fn list_boards(&self, principal: &str) -> BoardResult<Vec<BoardSummary>> {
        let boards = self.db.boards().list_for_user(principal).await?;

        let mut summaries = Vec::with_capacity(boards.len());
        for board in boards {
            summaries.push(self.summarize(board).await?);
        }
        Ok(summaries)
    }

    pub async fn create_board(&self, principal: &str, title: &str) -> BoardResult<BoardAggregate> {
        let title = required(title, "Title is required")?;

        let board = self
            .db
            .boards()
            .create(&Board {
                id: generate_entity_id(),
                title,
                owner_id: principal.to_string(),
                member_ids: vec![principal.to_string()],
                github_repo: None,
                created_at: String::new(),
                updated_at: String::new(),
            })
            .await?;

        for (order, title) in DEFAULT_LISTS.iter().enumerate() {
            self.db
                .lists()
                .create(&List {
                    id: generate_entity_id(),
                    title: title.to_string(),
                    board_id: board.id.clone(),
                    order: order as i64,
                    created_at: String::new(),
                    updated_at: String::new(),
                })
                .await?;
        }

        info!(board_id = %board.id, owner = principal, "board created");
        self.assemble(board).await
    }

    pub async fn update_board_title(
        &self,
        board_id: &str,
        principal: &str,
        title: &str,
    ) -> BoardResult<BoardSummary> {
        let title = required(title, "Title is required")?;
        let mut board = self
            .authorized_board(board_id, principal, Capability::Administer, "update this board")
            .await?;

        board.title = title;
        self.db.boards().update(&board).await?;

        let board = self.db.boards().get(board_id).await?;
        self.summarize(board).await
    }

    /// Delete a board together with its lists and tasks.
    pub async fn delete_board(&self, board_id: &str, principal: &str) -> BoardResult<()> {
        self.authorized_board(board_id, principal, Capability::Administer, "delete this board")
            .await?;
        self.db.boards().delete(board_id).await?;
        info!(board_id, "board deleted");
        Ok(())
    }

    pub async fn connect_repo(
        &self,
        board_id: &str,
        principal: &str,
        owner: &str,
        name: &str,
    ) -> BoardResult<BoardAggregate> {
        let message = "Repository owner and name are required";
        let owner = required(owner, message)?;
        let name = required(name, message)?;

        let mut board = self
            .authorized_board(
                board_id,
                principal,
                Capability::Administer,
                "connect a repository to this board",
            )
            .await?;

        board.github_repo = Some(GithubRepo {
            owner,
            name,
            connected: true,
        });
        self.db.boards().update(&board).await?;

        let board = self.db.boards().get(board_id).await?;
        self.assemble(board).await
    }

    /// Add a registered user, found by email, as a member. Idempotent.
    pub async fn add_member(
        &self,
        board_id: &str,
        principal: &str,
        email: &str,
    ) -> BoardResult<BoardSummary> {
        let email = required(email, "Email is required")?;
        self.authorized_board(board_id, principal, Capability::Administer, "manage members of this board")
            .await?;

        let user = self
            .db
            .users()
            .get_by_email(&email)
            .await?
            .ok_or_else(|| BoardError::NotFound {
                entity_type: "User".to_string(),
                id: email.clone(),
            })?;

        self.db.boards().add_member(board_id, &user.id).await?;

        let board = self.db.boards().get(board_id).await?;
        self.summarize(board).await
    }

    pub async fn remove_member(
        &self,
        board_id: &str,
        principal: &str,
        user_id: &str,
    ) -> BoardResult<BoardSummary> {
        let board = self
            .authorized_board(board_id, principal, Capability::Administer, "manage members of this board")
            .await?;

        if board.owner_id == user_id {
            return Err(BoardError::validation(
                "The board owner cannot be removed from its members",
            ));
        }

        self.db.boards().remove_member(board_id, user_id).await?;

        let board = self.db.boards().get(board_id).await?;
        self.summarize(board).await
    }

    /// Append a list at the end of the board.
    pub async fn create_list(
        &self,
        board_id: &str,
        principal: &str,
        title: &str,
    ) -> BoardResult<List> {
        let title = required(title, "Title is required")?;
        self.authorized_board(board_id, principal, Capability::Collaborate, "add lists to this board")
            .await?;

        let order = self.db.lists().count_by_board(board_id).await?;
        let list = self
            .db
            .lists()
            .create(&List {
                id: generate_entity_id(),
                title,
                board_id: board_id.to_string(),
                order,
                created_at: String::new(),
                updated_at: String::new(),
            })
            .await?;

        debug!(list_id = %list.id, board_id, order, "list created");
        Ok(list)
    }

    /// Rename a list and/or move it to another position among its board's lists.
    pub async fn update_list(
        &self,
        list_id: &str,
        principal: &str,
        title: Option<&str>,
        order: Option<i64>,
    ) -> BoardResult<List> {
        let mut list = self.db.lists().get(list_id).await?;
        self.authorized_board(&list.board_id, principal, Capability::Collaborate, "update this list")
            .await?;

        // Everything is validated before the first write.
        let title = title
            .map(|t| required(t, "Title is required"))
            .transpose()?;

        let sequence = match order {
            Some(order) => {
                let mut ids: Vec<String> = self
                    .db
                    .lists()
                    .list_by_board(&list.board_id)
                    .await?
                    .into_iter()
                    .map(|l| l.id)
                    .collect();

                let len = ids.len();
                let out_of_range = || {
                    BoardError::validation(format!(
                        "List order {} is out of range for {} lists",
                        order, len
                    ))
                };
                let to = usize::try_from(order).map_err(|_| out_of_range())?;
                let from = ids
                    .iter()
                    .position(|id| id == list_id)
                    .ok_or_else(|| BoardError::NotFound {
                        entity_type: "List".to_string(),
                        id: list_id.to_string(),
                    })?;

                reposition(&mut ids, from, to).map_err(|_| out_of_range())?;
                Some(ids)
            }
            None => None,
        };

        if let Some(title) = title {
            list.title = title;
            self.db.lists().update(&list).await?;
        }
        if let Some(ids) = sequence {
            self.db.lists().reorder(&list.board_id, &ids).await?;
        }

        Ok(self.db.lists().get(list_id).await?)
    }

    /// Delete a list and its tasks; remaining lists are renumbered.
    pub async fn delete_list(&self, list_id: &str, principal: &str) -> BoardResult<()> {
        let list = self.db.lists().get(list_id).await?;
        self.authorized_board(&list.board_id, principal, Capability::Collaborate, "delete this list")
            .await?;

        self.db.lists().delete(list_id).await?;
        debug!(list_id, board_id = %list.board_id, "list deleted");
        Ok(())
    }

    /// Append a task at the end of a list.
    pub async fn create_task(
        &self,
        list_id: &str,
        principal: &str,
        new: NewTask,
    ) -> BoardResult<Task> {
        let title = required(&new.title, "Title is required")?;
        let due_date = match new.due_date.as_deref() {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };

        let list = self.db.lists().get(list_id).await?;
        self.authorized_board(&list.board_id, principal, Capability::Collaborate, "add tasks to this list")
            .await?;

        let order = self.db.tasks().count_by_list(list_id).await?;
        let task = self
            .db
            .tasks()
            .create(&Task {
                id: generate_entity_id(),
                title,
                description: new.description.unwrap_or_default(),
                due_date,
                priority: new.priority.unwrap_or_default(),
                status: new.status.unwrap_or_default(),
                list_id: list.id.clone(),
                board_id: list.board_id.clone(),
                order,
                created_at: String::new(),
                updated_at: String::new(),
            })
            .await?;

        debug!(task_id = %task.id, list_id, order, "task created");
        Ok(task)
    }

    pub async fn get_task(&self, task_id: &str, principal: &str) -> BoardResult<Task> {
        let task = self.db.tasks().get(task_id).await?;
        self.authorized_board(&task.board_id, principal, Capability::Collaborate, "view this task")
            .await?;
        Ok(task)
    }

    /// Edit task fields. List membership only changes through [`Self::move_task`].
    pub async fn update_task(
        &self,
        task_id: &str,
        principal: &str,
        changes: TaskChanges,
    ) -> BoardResult<Task> {
        let mut task = self.db.tasks().get(task_id).await?;
        self.authorized_board(&task.board_id, principal, Capability::Collaborate, "update this task")
            .await?;

        if let Some(title) = changes.title {
            task.title = required(&title, "Title is required")?;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(raw) = changes.due_date {
            task.due_date = parse_due_date(&raw)?;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }

        self.db.tasks().update(&task).await?;
        Ok(self.db.tasks().get(task_id).await?)
    }

    /// Relocate a task and return the refreshed board.
    ///
    /// Validation, lookups and the authorization check all happen before the
    /// first write. The two list sequences are persisted in one transaction;
    /// if that fails the caller is told to reload the board.
    pub async fn move_task(
        &self,
        task_id: &str,
        principal: &str,
        request: &TaskMove,
    ) -> BoardResult<BoardAggregate> {
        if request.task_id != task_id {
            return Err(BoardError::validation(
                "taskId does not match the task being moved",
            ));
        }

        let task = self.db.tasks().get(task_id).await?;
        let board = self
            .authorized_board(&task.board_id, principal, Capability::Collaborate, "move this task")
            .await?;

        let source = self.db.lists().get(&request.source_list_id).await?;
        let target = self.db.lists().get(&request.target_list_id).await?;
        if source.board_id != task.board_id || target.board_id != task.board_id {
            return Err(BoardError::validation(
                "Cannot move tasks between different boards",
            ));
        }

        let before = self.assemble(board.clone()).await?;
        let mut after = before.clone();
        apply_move(&mut after, request)?;

        if request.is_noop() {
            debug!(task_id, "move leaves the task in place");
            return Ok(before);
        }

        let mut sequences = Vec::with_capacity(2);
        sequences.extend(after.sequence(&request.source_list_id));
        if !request.is_same_list() {
            sequences.extend(after.sequence(&request.target_list_id));
        }

        self.db
            .tasks()
            .persist_sequences(&sequences)
            .await
            .map_err(|e| {
                warn!(task_id, error = %e, "persisting move failed");
                BoardError::MoveFailed {
                    message: e.to_string(),
                }
            })?;

        info!(
            task_id,
            from = %request.source_list_id,
            to = %request.target_list_id,
            index = request.destination_index,
            "task moved"
        );

        let refreshed = self.assemble(board).await?;
        if let Err(e) = verify_integrity(&refreshed) {
            warn!(board_id = %refreshed.id, error = %e, "board integrity check failed after move");
        }
        Ok(refreshed)
    }

    /// Delete a task; remaining tasks of its list are renumbered.
    pub async fn delete_task(&self, task_id: &str, principal: &str) -> BoardResult<()> {
        let task = self.db.tasks().get(task_id).await?;
        self.authorized_board(&task.board_id, principal, Capability::Collaborate, "delete this task")
            .await?;

        self.db.tasks().delete(task_id).await?;
        debug!(task_id, list_id = %task.list_id, "task deleted");
        Ok(())
    }

    async fn authorized_board(
        &self,
        board_id: &str,
        principal: &str,
        capability: Capability,
        action: &str,
    ) -> BoardResult<Board> {
        let board = self.db.boards().get(board_id).await?;
        access::require(&board, principal, capability, action)?;
        Ok(board)
    }

    async fn people(&self, board: &Board) -> BoardResult<(UserSummary, Vec<UserSummary>)> {
        let owner = self.db.users().get(&board.owner_id).await?;
        let members = self.db.users().summaries(&board.member_ids).await?;
        Ok((UserSummary::from(&owner), members))
    }

    async fn summarize(&self, board: Board) -> BoardResult<BoardSummary> {
        let (owner, members) = self.people(&board).await?;
        Ok(BoardSummary::new(board, owner, members))
    }

    async fn assemble(&self, board: Board) -> BoardResult<BoardAggregate> {
        let (owner, members) = self.people(&board).await?;
        let lists = self.db.lists().list_by_board(&board.id).await?;
        let tasks = self.db.tasks().list_by_board(&board.id).await?;
        Ok(BoardAggregate::assemble(board, owner, members, lists, tasks))
    }
}

/// Trimmed, non-empty text or a validation error with `message`.
fn required(value: &str, message: &str) -> BoardResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BoardError::validation(message));
    }
    Ok(value.to_string())
}

/// Accept an RFC 3339 timestamp or a plain `YYYY-MM-DD` date. Empty clears.
pub fn parse_due_date(raw: &str) -> BoardResult<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if DateTime::parse_from_rfc3339(raw).is_ok() || NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
    {
        Ok(Some(raw.to_string()))
    } else {
        Err(BoardError::validation(format!(
            "Invalid due date '{}': expected RFC 3339 or YYYY-MM-DD",
            raw
        )))
    }
}
