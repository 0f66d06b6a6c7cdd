//! Host platform detection
//!
//! The command line builders branch on the platform family. It is carried as
//! a value in [`crate::config::ActContext`] so tests can build Windows lines
//! on Linux and the other way round.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Windows,
    Unix,
}

impl HostPlatform {
    /// Platform family of the running binary
    pub fn current() -> Self {
        if cfg!(windows) {
            HostPlatform::Windows
        } else {
            HostPlatform::Unix
        }
    }

    pub fn is_windows(self) -> bool {
        self == HostPlatform::Windows
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPlatform::Windows => write!(f, "windows"),
            HostPlatform::Unix => write!(f, "unix"),
        }
    }
}
