//! V1 API handlers.

mod boards;
mod lists;
mod system;
mod tasks;
mod users;
mod webhooks;

#[cfg(test)]
mod webhooks_test;

pub use boards::*;
pub use lists::*;
pub use system::*;
pub use tasks::*;
pub use users::*;
pub use webhooks::*;
