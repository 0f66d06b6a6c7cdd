//! Source tree enumeration
//!
//! Walks a root recursively and yields the files whose name matches a glob.
//! At each level the subdirectories are visited before the files; beyond
//! that the order is whatever the directory listing gives, so callers must
//! not rely on it.

use globset::{Glob, GlobMatcher};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::LayoutConfig;
use crate::error::ActResult;

fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    // stable sort: entries of the same kind keep their listing order
    b.file_type().is_dir().cmp(&a.file_type().is_dir())
}

/// Files under `root` whose file name matches `pattern`. A missing root
/// yields nothing.
pub fn enumerate(root: &Path, pattern: &str) -> ActResult<impl Iterator<Item = PathBuf> + use<>> {
    let matcher: GlobMatcher = Glob::new(pattern)?.compile_matcher();

    Ok(WalkDir::new(root)
        .sort_by(directories_first)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| matcher.is_match(entry.file_name()))
        .map(DirEntry::into_path))
}

/// Every file classified as library source: translation units and headers
/// of the library, plus the test-suite headers.
pub fn library_sources(layout: &LayoutConfig) -> ActResult<impl Iterator<Item = PathBuf> + use<>> {
    let library = layout.library_dir();
    Ok(enumerate(&library, "*.cpp")?
        .chain(enumerate(&library, "*.h")?)
        .chain(enumerate(&layout.testunits_dir(), "*TestSuite.h")?))
}

/// Path relative to `base` with `/` separators, for matching and display
pub fn relative_display(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Whether the `/`-separated relative path contains one of `fragments`.
/// The path is matched with a leading `/` so fragments like `/external/`
/// also catch top-level directories.
pub fn is_excepted(relative: &str, fragments: &[&str]) -> bool {
    let anchored = format!("/{relative}");
    fragments.iter().any(|fragment| anchored.contains(fragment))
}
