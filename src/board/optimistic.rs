//! Client-side optimistic moves with snapshot rollback.
//!
//! Each in-flight move goes `Idle -> Applied -> Confirmed | Reverted`. The
//! snapshot taken just before applying is the only thing a revert restores,
//! so a board holds at most one move in flight at a time.

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use super::aggregate::BoardAggregate;
use super::moves::{MoveError, TaskMove, apply_move};
use crate::db::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Idle,
    Applied,
    Confirmed,
    Reverted,
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum OptimisticError {
    #[error("task '{task_id}' already has a move in flight")]
    #[diagnostic(
        code(mrello::client::move_in_flight),
        help("Wait for the previous move of this task to resolve before dragging it again.")
    )]
    AlreadyInFlight { task_id: Id },

    #[error("task '{task_id}' is still moving")]
    #[diagnostic(
        code(mrello::client::board_busy),
        help("Moves are sent one at a time; wait for the pending one to resolve.")
    )]
    BoardBusy { task_id: Id },

    #[error("task '{task_id}' has no move in flight")]
    #[diagnostic(code(mrello::client::no_pending_move))]
    NoPendingMove { task_id: Id },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Move(#[from] MoveError),
}

/// One optimistic move and the board as it was before it.
#[derive(Debug, Clone)]
pub struct PendingMove {
    request: TaskMove,
    snapshot: BoardAggregate,
    state: MoveState,
}

impl PendingMove {
    pub fn new(request: TaskMove, board: &BoardAggregate) -> Self {
        Self {
            request,
            snapshot: board.clone(),
            state: MoveState::Idle,
        }
    }

    pub fn request(&self) -> &TaskMove {
        &self.request
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    /// `Idle -> Applied`: mirror the server's move on the local board.
    pub fn apply(&mut self, board: &mut BoardAggregate) -> Result<(), MoveError> {
        debug_assert_eq!(self.state, MoveState::Idle);
        apply_move(board, &self.request)?;
        self.state = MoveState::Applied;
        Ok(())
    }

    /// `Applied -> Confirmed`: adopt the server's echo of the board.
    pub fn confirm(&mut self, board: &mut BoardAggregate, server: BoardAggregate) {
        *board = server;
        self.state = MoveState::Confirmed;
    }

    /// `Applied -> Reverted`: restore the exact pre-move board.
    pub fn revert(&mut self, board: &mut BoardAggregate) {
        *board = self.snapshot.clone();
        self.state = MoveState::Reverted;
    }
}

/// A locally held board plus the move waiting on the server.
#[derive(Debug, Clone)]
pub struct OptimisticBoard {
    board: BoardAggregate,
    in_flight: Option<PendingMove>,
}

impl OptimisticBoard {
    pub fn new(board: BoardAggregate) -> Self {
        Self {
            board,
            in_flight: None,
        }
    }

    pub fn board(&self) -> &BoardAggregate {
        &self.board
    }

    pub fn into_board(self) -> BoardAggregate {
        self.board
    }

    pub fn is_in_flight(&self, task_id: &str) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|p| p.request().task_id == task_id)
    }

    /// Apply a move locally and remember how to undo it.
    pub fn begin(&mut self, request: TaskMove) -> Result<MoveState, OptimisticError> {
        if let Some(pending) = &self.in_flight {
            let task_id = pending.request().task_id.clone();
            return Err(if task_id == request.task_id {
                OptimisticError::AlreadyInFlight { task_id }
            } else {
                OptimisticError::BoardBusy { task_id }
            });
        }

        let mut pending = PendingMove::new(request, &self.board);
        pending.apply(&mut self.board)?;
        debug!(task_id = %pending.request().task_id, "move applied optimistically");

        let state = pending.state();
        self.in_flight = Some(pending);
        Ok(state)
    }

    /// The server accepted the move; reconcile with the board it returned.
    pub fn confirm(
        &mut self,
        task_id: &str,
        server: BoardAggregate,
    ) -> Result<MoveState, OptimisticError> {
        let mut pending = self.take(task_id)?;
        pending.confirm(&mut self.board, server);
        Ok(pending.state())
    }

    /// The server rejected the move; put the board back as it was.
    pub fn revert(&mut self, task_id: &str) -> Result<MoveState, OptimisticError> {
        let mut pending = self.take(task_id)?;
        pending.revert(&mut self.board);
        debug!(task_id, "optimistic move reverted");
        Ok(pending.state())
    }

    fn take(&mut self, task_id: &str) -> Result<PendingMove, OptimisticError> {
        self.in_flight
            .take_if(|p| p.request().task_id == task_id)
            .ok_or_else(|| OptimisticError::NoPendingMove {
                task_id: task_id.to_string(),
            })
    }
}
