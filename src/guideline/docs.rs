use std::path::{Path, PathBuf};
use std::process::Command;

use crate::cli::Output;
use crate::error::{ActError, ActResult};
use crate::platform::HostPlatform;

/// Counts (and optionally fixes) undocumented items in the Python binding
pub trait DocLinter {
    fn missing_doc_count(&self, auto_correct: bool, output: &Output) -> ActResult<usize>;
}

/// Runs an external linter that prints one line per missing docstring.
/// `--correction` is appended in correction mode.
#[derive(Debug, Clone)]
pub struct CommandDocLinter {
    command: String,
    cwd: PathBuf,
    platform: HostPlatform,
}

impl CommandDocLinter {
    pub fn new(command: impl Into<String>, cwd: &Path, platform: HostPlatform) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.to_path_buf(),
            platform,
        }
    }

    fn command_line(&self, auto_correct: bool) -> String {
        if auto_correct {
            format!("{} --correction", self.command)
        } else {
            self.command.clone()
        }
    }
}

impl DocLinter for CommandDocLinter {
    fn missing_doc_count(&self, auto_correct: bool, output: &Output) -> ActResult<usize> {
        let line = self.command_line(auto_correct);
        let mut cmd = match self.platform {
            HostPlatform::Windows => {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C").arg(&line);
                cmd
            }
            HostPlatform::Unix => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(&line);
                cmd
            }
        };

        let result = cmd.current_dir(&self.cwd).output()?;
        let stdout = String::from_utf8_lossy(&result.stdout);
        let findings: Vec<&str> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if findings.is_empty() && !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            tracing::debug!("doc linter stderr: {}", stderr.trim());
            return Err(ActError::CommandFailed(result.status.code().unwrap_or(1)));
        }

        for finding in &findings {
            output.notif(&format!("missing doc: [{finding}]"));
        }
        Ok(findings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_flag() {
        let linter = CommandDocLinter::new("python act.py missingDocs", Path::new("."), HostPlatform::Unix);
        assert_eq!(linter.command_line(false), "python act.py missingDocs");
        assert_eq!(linter.command_line(true), "python act.py missingDocs --correction");
    }

    #[cfg(unix)]
    #[test]
    fn test_counts_non_empty_lines() {
        let linter = CommandDocLinter::new(
            "printf 'pyAgrum.BayesNet.foo\\n\\npyAgrum.Potential.bar\\n'",
            Path::new("."),
            HostPlatform::Unix,
        );
        let count = linter.missing_doc_count(false, &Output::new(false, true)).unwrap();
        assert_eq!(count, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_silent_failure_is_an_error() {
        let linter = CommandDocLinter::new("exit 3", Path::new("."), HostPlatform::Unix);
        assert!(matches!(
            linter.missing_doc_count(false, &Output::new(false, true)),
            Err(ActError::CommandFailed(3))
        ));
    }
}
