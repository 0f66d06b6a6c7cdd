//! Error taxonomy for act
//!
//! Every fatal condition is a variant here. Leaf components return these and
//! the driver turns them into a process exit status, so nothing below the
//! CLI ever terminates the process itself.

use std::io;

/// Fatal errors raised while validating a configuration or running a build.
#[derive(Debug, thiserror::Error)]
pub enum ActError {
    /// A configuration field carries a value outside its closed set.
    #[error("Invalid value '{value}' for option '{option}' (expected one of: {expected})")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("Action '{action}' not treated for target '{target}' on {platform}")]
    UnsupportedAction {
        action: String,
        target: String,
        platform: String,
    },

    #[error("Compiler '{compiler}' is not available on {platform}")]
    UnsupportedCompiler { compiler: String, platform: String },

    #[error("{0} not found")]
    ToolNotFound(String),

    #[error("Only [-t all] or [-t quick[:subset]] for testing pyAgrum (got '{0}')")]
    InvalidTestScope(String),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Invalid dependency graph {path}: {message}")]
    InvalidGraph { path: String, message: String },

    /// A checked external step exited with a nonzero status.
    #[error("Received error {0}")]
    CommandFailed(i32),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ActError {
    /// Process exit status for this error. A failed external step propagates
    /// its own status; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ActError::CommandFailed(rc) if *rc != 0 => *rc,
            _ => 1,
        }
    }
}

/// Result alias used by the build and guideline components.
pub type ActResult<T> = std::result::Result<T, ActError>;
