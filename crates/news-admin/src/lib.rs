//! Command line administration of the news tagging store

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::Services;
