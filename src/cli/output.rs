//! Console output for act
//!
//! Every user-facing line goes through [`Output`]. Text between square
//! brackets is highlighted, so `"No cpp file for [base/foo.h]"` prints the
//! path in the value color without the brackets.

use console::{Term, style};
use std::io::{self, Write};

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

/// Style the bracketed segments of `message`, dropping the brackets
pub fn highlight(message: &str) -> String {
    let mut result = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(start) = rest.find('[') {
        let Some(len) = rest[start + 1..].find(']') else {
            break;
        };
        result.push_str(&rest[..start]);
        let value = &rest[start + 1..start + 1 + len];
        result.push_str(&style(value).yellow().bold().to_string());
        rest = &rest[start + len + 2..];
    }

    result.push_str(rest);
    result
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a notification
    pub fn notif(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), highlight(message));
        }
    }

    /// Print a notification that the next line overwrites. Outside a
    /// terminal these are only shown in verbose mode.
    pub fn notif_oneline(&self, message: &str) {
        if self.quiet {
            return;
        }

        let term = Term::stdout();
        if term.is_term() {
            let _ = term.clear_line();
            print!("{} {}\r", style("ℹ").dim(), highlight(message));
            let _ = io::stdout().flush();
        } else if self.verbose {
            println!("{} {}", style("ℹ").dim(), highlight(message));
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), highlight(message));
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), highlight(message));
        }
    }

    /// Print an error message. Errors are shown even in quiet mode.
    pub fn error(&self, message: &str) {
        // clear a pending one-line notification first
        let term = Term::stdout();
        if term.is_term() {
            let _ = term.clear_line();
        }
        eprintln!("{} {}", style("✖").red(), highlight(message));
    }

    /// Print a fatal error and the stop marker
    pub fn critical(&self, message: &str) {
        eprintln!("{} {}", style("✖").red().bold(), style(message).red().bold());
        eprintln!("{}", style("Stopped.").dim());
    }

    /// Echo a command about to be run (or skipped in dry-run mode)
    pub fn trace(&self, command: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), style(command).dim());
        }
    }

    /// Print a section header
    pub fn section_header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(highlight(title)).bold().cyan());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<12} {}", style(key).dim(), value);
        }
    }
}
