pub mod board;
pub mod serve;
pub mod task;
pub mod user;

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;
