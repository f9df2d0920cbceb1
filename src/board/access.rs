//! Capability checks applied before every board, list and task mutation.

use crate::db::Board;

use super::error::BoardError;

/// What a caller is about to do with a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read the board, manage its lists and tasks, move tasks.
    Collaborate,
    /// Rename or delete the board, change members or the GitHub link.
    Administer,
}

/// True when the principal is the board owner or one of its members.
pub fn is_authorized(board: &Board, principal: &str) -> bool {
    board.owner_id == principal || board.member_ids.iter().any(|m| m == principal)
}

/// Require a capability, failing with a `Forbidden` error naming the action.
pub fn require(
    board: &Board,
    principal: &str,
    capability: Capability,
    action: &str,
) -> Result<(), BoardError> {
    let allowed = match capability {
        Capability::Collaborate => is_authorized(board, principal),
        Capability::Administer => board.owner_id == principal,
    };

    if allowed {
        Ok(())
    } else {
        Err(BoardError::Forbidden {
            message: format!("User not authorized to {}", action),
        })
    }
}
