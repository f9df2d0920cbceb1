pub mod api;
pub mod board;
pub mod cli;
pub mod db;
pub mod github;
pub mod paths;
