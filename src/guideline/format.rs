//! Formatting check
//!
//! The formatter renders each file to memory; any difference from the file
//! on disk is a violation. In correction mode the formatter rewrites the file
//! in place instead.

use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use super::CheckResult;
use super::sources::{is_excepted, library_sources, relative_display};
use crate::cli::Output;
use crate::config::LayoutConfig;
use crate::error::ActResult;

const EXCEPTIONS: &[&str] = &["/external/", "Parser", "Scanner"];

/// External source formatter
pub trait Formatter {
    fn name(&self) -> &str;

    /// Whether the tool can run on this host
    fn is_available(&self) -> bool;

    /// Formatted content of `path`, without touching the file
    fn reformat(&self, path: &Path) -> io::Result<String>;

    /// Format `path` in place
    fn rewrite(&self, path: &Path) -> io::Result<()>;
}

/// clang-format, picking up the project's `.clang-format`
#[derive(Debug, Clone)]
pub struct ClangFormat {
    executable: Option<String>,
}

impl ClangFormat {
    /// `executable` is the resolved path, `None` when it was not found
    pub fn new(executable: Option<String>) -> Self {
        Self { executable }
    }

    fn command(&self) -> io::Result<Command> {
        let executable = self
            .executable
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "clang-format not found"))?;
        let mut cmd = Command::new(executable);
        cmd.arg("-style=file");
        Ok(cmd)
    }
}

impl Formatter for ClangFormat {
    fn name(&self) -> &str {
        "clang-format"
    }

    fn is_available(&self) -> bool {
        self.executable.is_some()
    }

    fn reformat(&self, path: &Path) -> io::Result<String> {
        let output = self.command()?.arg(path).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "clang-format failed on {}: {}",
                path.display(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn rewrite(&self, path: &Path) -> io::Result<()> {
        let status = self.command()?.arg("-i").arg(path).status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "clang-format -i failed on {}",
                path.display()
            )));
        }
        Ok(())
    }
}

/// Number of lines that differ between two texts
fn changed_lines(original: &str, formatted: &str) -> usize {
    TextDiff::from_lines(original, formatted)
        .iter_all_changes()
        .filter(|change| change.tag() != ChangeTag::Equal)
        .count()
}

/// Check every library source against the formatter's output
pub fn check_format(
    layout: &LayoutConfig,
    formatter: &dyn Formatter,
    auto_correct: bool,
    output: &Output,
) -> ActResult<CheckResult> {
    let mut result = CheckResult::new("format", "format");

    if !formatter.is_available() {
        output.error(&format!("No correct [{}] tool has been found.", formatter.name()));
        result.skipped = true;
        return Ok(result);
    }

    for file in library_sources(layout)? {
        let shown = relative_display(&layout.root, &file);
        if is_excepted(&shown, EXCEPTIONS) {
            continue;
        }

        let formatted = match formatter.reformat(&file) {
            Ok(formatted) => formatted,
            Err(e) => {
                output.error(&format!("[{shown}] could not be formatted: {e}"));
                continue;
            }
        };
        let original = match fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                output.error(&format!("[{shown}] could not be read: {e}"));
                continue;
            }
        };
        if original == formatted {
            let name = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            output.notif_oneline(&format!("[{name}] OK"));
            continue;
        }

        result.violations += 1;
        let changes = changed_lines(&original, &formatted);
        if auto_correct {
            if let Err(e) = formatter.rewrite(&file) {
                output.error(&format!("[{shown}] could not be rewritten: {e}"));
                continue;
            }
            result.corrected += 1;
            output.notif(&format!(
                "[{shown}] not correctly formatted ({changes} lines) : [changed]"
            ));
        } else {
            output.notif(&format!("[{shown}] not correctly formatted ({changes} lines)"));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_lines() {
        assert_eq!(changed_lines("a\nb\n", "a\nb\n"), 0);
        // one line removed, one inserted
        assert_eq!(changed_lines("a\nb  \n", "a\nb\n"), 2);
    }

    #[test]
    fn test_clang_format_without_executable() {
        let formatter = ClangFormat::new(None);
        assert!(!formatter.is_available());
        let err = formatter.reformat(Path::new("x.h")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
