//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Every method returns a `Send` future so handlers generic over
//! [`Database`] can be served by axum.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Board, Id, List, Task, User, UserSummary},
};

/// The full ordered task sequence of one list, as it should be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSequence {
    pub list_id: Id,
    pub task_ids: Vec<Id>,
}

/// Repository for User and session operations.
pub trait UserRepository {
    /// Create a new user. Fails with `AlreadyExists` if the email is taken.
    fn create(&self, user: &User) -> impl Future<Output = DbResult<User>> + Send;

    /// Get a user by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<User>> + Send;

    /// Get a user by email address.
    fn get_by_email(&self, email: &str) -> impl Future<Output = DbResult<Option<User>>> + Send;

    /// Public summaries for the given IDs, in the same order. Unknown IDs are skipped.
    fn summaries(&self, ids: &[Id]) -> impl Future<Output = DbResult<Vec<UserSummary>>> + Send;

    /// Store a session token digest for a user.
    fn create_session(
        &self,
        user_id: &str,
        token_hash: &str,
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Resolve a session token digest to its user.
    fn find_by_session(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = DbResult<Option<User>>> + Send;
}

/// Repository for Board operations.
pub trait BoardRepository {
    /// Create a board together with its member rows.
    fn create(&self, board: &Board) -> impl Future<Output = DbResult<Board>> + Send;

    /// Get a board (with members) by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Board>> + Send;

    /// All boards the user owns or is a member of.
    fn list_for_user(&self, user_id: &str) -> impl Future<Output = DbResult<Vec<Board>>> + Send;

    /// Update title and GitHub link.
    fn update(&self, board: &Board) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a board with all of its lists, tasks and memberships.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Add a member. Adding an existing member is a no-op.
    fn add_member(
        &self,
        board_id: &str,
        user_id: &str,
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Remove a member.
    fn remove_member(
        &self,
        board_id: &str,
        user_id: &str,
    ) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for List operations.
pub trait ListRepository {
    /// Insert a list with the order it carries.
    fn create(&self, list: &List) -> impl Future<Output = DbResult<List>> + Send;

    /// Get a list by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<List>> + Send;

    /// Lists of a board sorted by order.
    fn list_by_board(&self, board_id: &str) -> impl Future<Output = DbResult<Vec<List>>> + Send;

    /// Number of lists on a board.
    fn count_by_board(&self, board_id: &str) -> impl Future<Output = DbResult<i64>> + Send;

    /// Update the title.
    fn update(&self, list: &List) -> impl Future<Output = DbResult<()>> + Send;

    /// Rewrite list orders of a board to match `list_ids` positions.
    fn reorder(
        &self,
        board_id: &str,
        list_ids: &[Id],
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a list and its tasks, then renumber the remaining lists of its board.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Task operations.
pub trait TaskRepository {
    /// Insert a task with the order it carries.
    fn create(&self, task: &Task) -> impl Future<Output = DbResult<Task>> + Send;

    /// Get a task by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<Task>> + Send;

    /// Tasks of a list sorted by order.
    fn list_by_list(&self, list_id: &str) -> impl Future<Output = DbResult<Vec<Task>>> + Send;

    /// Tasks of a board, grouped by list and sorted by order within each list.
    fn list_by_board(&self, board_id: &str) -> impl Future<Output = DbResult<Vec<Task>>> + Send;

    /// Number of tasks in a list.
    fn count_by_list(&self, list_id: &str) -> impl Future<Output = DbResult<i64>> + Send;

    /// Update editable fields (title, description, due date, priority, status).
    fn update(&self, task: &Task) -> impl Future<Output = DbResult<()>> + Send;

    /// Persist whole list sequences in one transaction: every task named in a
    /// sequence gets that list as its `list_id` and its index as its `order`.
    fn persist_sequences(
        &self,
        sequences: &[ListSequence],
    ) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a task and renumber the remaining tasks of its list.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Users<'a>: UserRepository + Send + Sync
    where
        Self: 'a;
    type Boards<'a>: BoardRepository + Send + Sync
    where
        Self: 'a;
    type Lists<'a>: ListRepository + Send + Sync
    where
        Self: 'a;
    type Tasks<'a>: TaskRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;

    /// Get the board repository.
    fn boards(&self) -> Self::Boards<'_>;

    /// Get the list repository.
    fn lists(&self) -> Self::Lists<'_>;

    /// Get the task repository.
    fn tasks(&self) -> Self::Tasks<'_>;
}
