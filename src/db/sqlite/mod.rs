//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod board;
mod connection;
mod list;
mod task;
mod user;

#[cfg(test)]
mod board_test;
#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod task_test;
#[cfg(test)]
mod test_support;
#[cfg(test)]
mod user_test;

pub use board::SqliteBoardRepository;
pub use connection::SqliteDatabase;
pub use list::SqliteListRepository;
pub use task::SqliteTaskRepository;
pub use user::SqliteUserRepository;
