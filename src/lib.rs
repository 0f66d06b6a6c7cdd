//! # act - build orchestration for aGrUM and pyAgrum
//!
//! act turns a handful of options (action, target, mode, modules, compiler)
//! into the exact CMake configure line, the make or MSBuild compile line and
//! the test verification line, then runs them in the per-mode build
//! directory. It also checks the source tree against the project guidelines:
//! paired translation units, license headers, documentation, formatting and
//! module dependencies.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build and install the native library
//! act install aGrUM -d /opt/agrum
//!
//! # Show what a pyAgrum test run would execute
//! act --dry-run test pyAgrum -t quick
//!
//! # Check the sources and fix what can be fixed
//! act guideline --correction
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod guideline;
pub mod platform;

pub use cli::{Cli, Output};
pub use config::{ActConfig, ActContext, BuildConfig};
pub use error::{ActError, ActResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
