//! Relocating a task between or within lists.
//!
//! [`apply_move`] is the single implementation of the move: the server runs it
//! on the freshly loaded aggregate before persisting, and the client runs it on
//! its local copy before the request resolves, so both sides agree on the
//! resulting positions.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::aggregate::BoardAggregate;
use super::order::recompute_order;
use crate::db::Id;

/// A fully specified move of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMove {
    pub task_id: Id,
    pub source_list_id: Id,
    pub target_list_id: Id,
    pub source_index: usize,
    pub destination_index: usize,
}

impl TaskMove {
    pub fn is_same_list(&self) -> bool {
        self.source_list_id == self.target_list_id
    }

    /// Same list, same slot: nothing changes.
    pub fn is_noop(&self) -> bool {
        self.is_same_list() && self.source_index == self.destination_index
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("list '{list_id}' is not on this board")]
    #[diagnostic(code(mrello::board::list_not_on_board))]
    ListNotOnBoard { list_id: Id },

    #[error("source index {index} is out of range for a list of {len} tasks")]
    #[diagnostic(code(mrello::board::source_index))]
    SourceIndexOutOfRange { index: usize, len: usize },

    #[error("task '{task_id}' is not at index {index} of its source list")]
    #[diagnostic(
        code(mrello::board::stale_index),
        help("The board changed since it was loaded; reload it and retry.")
    )]
    TaskNotAtSourceIndex { task_id: Id, index: usize },

    #[error("destination index {index} is out of range (at most {max})")]
    #[diagnostic(code(mrello::board::destination_index))]
    DestinationIndexOutOfRange { index: usize, max: usize },
}

/// Apply a move to a board: remove the task from the source sequence, insert
/// it into the target sequence, point it at the target list and recompute the
/// orders of both lists. The board is left untouched on error.
pub fn apply_move(board: &mut BoardAggregate, mv: &TaskMove) -> Result<(), MoveError> {
    let source = position_of(board, &mv.source_list_id)?;
    let target = position_of(board, &mv.target_list_id)?;

    let source_len = board.lists[source].tasks.len();
    if mv.source_index >= source_len {
        return Err(MoveError::SourceIndexOutOfRange {
            index: mv.source_index,
            len: source_len,
        });
    }
    if board.lists[source].tasks[mv.source_index].id != mv.task_id {
        return Err(MoveError::TaskNotAtSourceIndex {
            task_id: mv.task_id.clone(),
            index: mv.source_index,
        });
    }

    let max = if source == target {
        source_len - 1
    } else {
        board.lists[target].tasks.len()
    };
    if mv.destination_index > max {
        return Err(MoveError::DestinationIndexOutOfRange {
            index: mv.destination_index,
            max,
        });
    }

    let mut task = board.lists[source].tasks.remove(mv.source_index);
    task.list_id = board.lists[target].id.clone();
    board.lists[target].tasks.insert(mv.destination_index, task);

    recompute_order(&mut board.lists[source].tasks);
    if source != target {
        recompute_order(&mut board.lists[target].tasks);
    }

    Ok(())
}

fn position_of(board: &BoardAggregate, list_id: &str) -> Result<usize, MoveError> {
    board
        .lists
        .iter()
        .position(|l| l.id == list_id)
        .ok_or_else(|| MoveError::ListNotOnBoard {
            list_id: list_id.to_string(),
        })
}
