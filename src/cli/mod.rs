//! Command-line interface for act
//!
//! Argument parsing lives in [`commands`]; everything printed for the user
//! goes through [`Output`].

pub mod commands;
mod output;

pub use commands::Cli;
pub use output::{Output, highlight};
