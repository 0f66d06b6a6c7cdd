use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::CheckResult;
use super::sources::{is_excepted, library_sources, relative_display};
use super::templates::{HEADER_TERMINATOR, LICENSE_MARKER, LICENSE_SEARCH_LINES, LICENSE_TEMPLATE};
use crate::cli::Output;
use crate::config::LayoutConfig;
use crate::error::ActResult;

const EXCEPTIONS: &[&str] = &["/mvsc/", "/external/", "/cxxtest/", "Parser", "Scanner"];

/// First `count` lines of a file, decoded leniently
fn leading_lines(path: &Path, count: usize) -> io::Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let mut fragment = Vec::new();
    for line in reader.split(b'\n').take(count) {
        fragment.extend(line?);
        fragment.push(b'\n');
    }
    Ok(String::from_utf8_lossy(&fragment).into_owned())
}

pub fn has_license(path: &Path) -> io::Result<bool> {
    Ok(leading_lines(path, LICENSE_SEARCH_LINES)?.contains(LICENSE_MARKER))
}

/// Replace the leading comment block with the license template.
///
/// Everything up to and including the first [`HEADER_TERMINATOR`] is taken
/// as the old header and dropped; later terminators stay untouched. Without
/// any terminator the whole content is kept below the new license. The
/// content is handled as bytes, so sources in any encoding survive as is.
pub fn add_license_at_top(path: &Path) -> io::Result<()> {
    let content = fs::read(path)?;
    let terminator = HEADER_TERMINATOR.as_bytes();
    let code = match content
        .windows(terminator.len())
        .position(|window| window == terminator)
    {
        Some(start) => &content[start + terminator.len()..],
        None => &content[..],
    };

    let mut rewritten = Vec::with_capacity(LICENSE_TEMPLATE.len() + code.len());
    rewritten.extend_from_slice(LICENSE_TEMPLATE.as_bytes());
    rewritten.extend_from_slice(code);
    fs::write(path, rewritten)
}

/// Every library source must carry the LGPL license in its first lines
pub fn check_license(layout: &LayoutConfig, auto_correct: bool, output: &Output) -> ActResult<CheckResult> {
    let mut result = CheckResult::new("license", "missing LGPL licence");

    for file in library_sources(layout)? {
        let shown = relative_display(&layout.root, &file);
        if is_excepted(&shown, EXCEPTIONS) {
            continue;
        }
        match has_license(&file) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                output.error(&format!("[{shown}] could not be read: {e}"));
                continue;
            }
        }

        result.violations += 1;
        if auto_correct {
            if let Err(e) = add_license_at_top(&file) {
                output.error(&format!("[{shown}] could not be rewritten: {e}"));
                continue;
            }
            result.corrected += 1;
            output.notif(&format!(
                "[{shown}] has no LGPL copyright in its first lines : [changed]"
            ));
        } else {
            output.notif(&format!("[{shown}] has no LGPL copyright in its first lines"));
        }
    }

    Ok(result)
}
