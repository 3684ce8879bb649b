pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod git;
pub mod log;
pub mod tags;
pub mod ui;

pub use error::{ChangelogError, Result};
