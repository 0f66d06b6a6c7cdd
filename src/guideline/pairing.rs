use std::fs;
use std::path::Path;

use super::CheckResult;
use super::sources::{enumerate, is_excepted, relative_display};
use super::templates;
use crate::cli::Output;
use crate::config::LayoutConfig;
use crate::error::ActResult;

const EXCEPTIONS: &[&str] = &["/mvsc/", "/signal/", "/external/", "multidim/patterns/"];

/// Headers that never get a translation unit of their own
const UNPAIRED_HEADERS: &[&str] = &["agrum.h", "inline.h"];

/// Stems of template and inline implementation headers
const IMPLEMENTATION_SUFFIXES: &[&str] = &["_tpl", "_inl"];

fn needs_pair(layout: &LayoutConfig, header: &Path) -> bool {
    let relative = relative_display(&layout.root, header);
    if is_excepted(&relative, EXCEPTIONS) {
        return false;
    }

    let name = header.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if UNPAIRED_HEADERS.contains(&name) {
        return false;
    }

    let stem = header.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    !IMPLEMENTATION_SUFFIXES
        .iter()
        .any(|suffix| stem.ends_with(suffix))
}

/// Every library header needs a sibling `.cpp` with the same stem. With
/// `auto_correct`, the missing file is created including the header.
pub fn check_cpp_files(layout: &LayoutConfig, auto_correct: bool, output: &Output) -> ActResult<CheckResult> {
    let mut result = CheckResult::new("cpp_pairing", "missing cppfile");
    let sources = layout.sources_dir();

    for header in enumerate(&layout.library_dir(), "*.h")? {
        if !needs_pair(layout, &header) {
            continue;
        }

        let cppfile = header.with_extension("cpp");
        if cppfile.is_file() {
            continue;
        }

        result.violations += 1;
        let shown = relative_display(&layout.root, &header);
        if auto_correct {
            let include = relative_display(&sources, &header);
            if let Err(e) = fs::write(&cppfile, templates::cpp_for_header(&include)) {
                output.error(&format!("No cpp file for [{shown}] : cannot create it ({e})"));
                continue;
            }
            result.corrected += 1;
            output.error(&format!("No cpp file for [{shown}] : [added]"));
        } else {
            output.error(&format!("No cpp file for [{shown}]"));
        }
    }

    Ok(result)
}
