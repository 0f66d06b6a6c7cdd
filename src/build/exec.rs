//! Process execution for generated command lines
//!
//! Command lines embed quoting, redirections and `&` chaining, so they are
//! handed to the platform shell verbatim rather than split into arguments.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::cli::Output;
use crate::config::BuildConfig;
use crate::error::{ActError, ActResult};
use crate::platform::HostPlatform;

/// Runs one command line to completion and reports its exit status
pub trait ProcessExecutor {
    fn execute(&self, line: &str, cwd: &Path) -> io::Result<i32>;
}

/// Executor backed by `sh -c` or `cmd /C`
#[derive(Debug, Clone, Copy)]
pub struct ShellExecutor {
    platform: HostPlatform,
}

impl ShellExecutor {
    pub fn new(platform: HostPlatform) -> Self {
        Self { platform }
    }
}

impl ProcessExecutor for ShellExecutor {
    fn execute(&self, line: &str, cwd: &Path) -> io::Result<i32> {
        let mut cmd = match self.platform {
            HostPlatform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(line);
                cmd
            }
            HostPlatform::Unix => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
        };

        let status = cmd.current_dir(cwd).status()?;
        // killed by a signal: no code, report a plain failure
        Ok(status.code().unwrap_or(1))
    }
}

/// Run `line` unless in dry-run mode. The line is echoed in dry-run and
/// verbose modes. With `check_rc`, a nonzero status comes back as
/// [`ActError::CommandFailed`] for the driver to report; there is no retry.
pub fn exec_from_line(
    config: &BuildConfig,
    line: &str,
    check_rc: bool,
    cwd: &Path,
    executor: &dyn ProcessExecutor,
    output: &Output,
) -> ActResult<()> {
    if config.dry_run || config.verbose {
        output.trace(line);
    }
    if config.dry_run {
        return Ok(());
    }

    tracing::debug!("Executing in {}: {}", cwd.display(), line);
    let rc = executor.execute(line, cwd)?;
    if check_rc && rc != 0 {
        return Err(ActError::CommandFailed(rc));
    }

    Ok(())
}
