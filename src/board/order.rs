//! The dense zero-based `order` model.
//!
//! Lists are ordered within their board and tasks within their list. After
//! any mutation settles the orders of siblings are exactly `0..n`.

use thiserror::Error;

use super::aggregate::BoardAggregate;
use crate::db::Task;

/// Anything positioned among siblings by an integer `order`.
pub trait Ordered {
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

impl Ordered for Task {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Rewrite every item's `order` to its index in the sequence.
pub fn recompute_order<T: Ordered>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_order(position as i64);
    }
}

/// Stable sort by `order`.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// True when the items, in sequence, carry orders `0..n`.
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(position, item)| item.order() == position as i64)
}

/// Move one element of a sequence to a new index, as a drag within one column.
pub fn reposition<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderError> {
    if from >= items.len() {
        return Err(OrderError::OutOfRange {
            index: from,
            len: items.len(),
        });
    }
    if to >= items.len() {
        return Err(OrderError::OutOfRange {
            index: to,
            len: items.len(),
        });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("position {index} is out of range for {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// A broken cross-record invariant found by [`verify_integrity`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("list orders on board '{board_id}' are not contiguous")]
    ListOrderGap { board_id: String },

    #[error("task orders in list '{list_id}' are not contiguous")]
    TaskOrderGap { list_id: String },

    #[error("task '{task_id}' sits in list '{list_id}' but references list '{claimed}'")]
    ListMismatch {
        task_id: String,
        list_id: String,
        claimed: String,
    },

    #[error("task '{task_id}' references board '{claimed}' instead of '{board_id}'")]
    BoardMismatch {
        task_id: String,
        board_id: String,
        claimed: String,
    },

    #[error("owner is missing from the members of board '{board_id}'")]
    OwnerNotMember { board_id: String },
}

/// Check every board invariant on an assembled aggregate.
pub fn verify_integrity(board: &BoardAggregate) -> Result<(), IntegrityError> {
    if !board.members.iter().any(|m| m.id == board.owner.id) {
        return Err(IntegrityError::OwnerNotMember {
            board_id: board.id.clone(),
        });
    }

    if !is_dense(&board.lists) {
        return Err(IntegrityError::ListOrderGap {
            board_id: board.id.clone(),
        });
    }

    for list in &board.lists {
        if !is_dense(&list.tasks) {
            return Err(IntegrityError::TaskOrderGap {
                list_id: list.id.clone(),
            });
        }

        for task in &list.tasks {
            if task.list_id != list.id {
                return Err(IntegrityError::ListMismatch {
                    task_id: task.id.clone(),
                    list_id: list.id.clone(),
                    claimed: task.list_id.clone(),
                });
            }
            if task.board_id != board.id {
                return Err(IntegrityError::BoardMismatch {
                    task_id: task.id.clone(),
                    board_id: board.id.clone(),
                    claimed: task.board_id.clone(),
                });
            }
        }
    }

    Ok(())
}
