//! Board domain: ordering, moves, authorization and the services built on them.
//!
//! # Architecture
//!
//! - `order`: dense zero-based ordering and the integrity check
//! - `aggregate`: the nested board view
//! - `moves`: the single move algorithm shared by server and client
//! - `optimistic`: client-side apply/confirm/revert per in-flight move
//! - `access`: owner/member capability checks
//! - `service`, `accounts`: operations on top of a [`Database`](crate::db::Database)

mod access;
mod accounts;
mod aggregate;
mod error;
mod moves;
mod optimistic;
mod order;
mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use access::{Capability, is_authorized, require};
pub use accounts::{AccountService, IssuedToken};
pub use aggregate::{BoardAggregate, BoardSummary, ListAggregate};
pub use error::{BoardError, BoardResult};
pub use moves::{MoveError, TaskMove, apply_move};
pub use optimistic::{MoveState, OptimisticBoard, OptimisticError, PendingMove};
pub use order::{
    IntegrityError, OrderError, Ordered, is_dense, recompute_order, reposition, sort_by_order,
    verify_integrity,
};
pub use service::{BoardService, DEFAULT_LISTS, NewTask, TaskChanges, parse_due_date};
