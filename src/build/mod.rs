//! Native build orchestration
//!
//! Turns a validated [`BuildConfig`](crate::config::BuildConfig) into the
//! exact CMake, make/MSBuild and verification command lines, and runs them
//! through a [`ProcessExecutor`]. Line construction is pure; only
//! [`exec::exec_from_line`] and [`pipeline`] touch the outside world.

pub mod cmake;
pub mod exec;
pub mod jobs;
pub mod make;
pub mod modules;
pub mod pipeline;
pub mod post;

pub use cmake::configure_line;
pub use exec::{ProcessExecutor, ShellExecutor, exec_from_line};
pub use make::compile_line;
pub use pipeline::BuildPlan;
pub use post::{PostLine, post_line};

#[cfg(test)]
mod tests;
