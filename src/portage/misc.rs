//! Small predicates over portage tree paths

use std::path::Path;

/// Extension of every versioned package file
pub const EBUILD_EXTENSION: &str = "ebuild";

/// Does the file name of `path` end in `.ebuild`?
pub fn is_ebuild(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(EBUILD_EXTENSION))
        .is_some_and(|stem| stem.ends_with('.'))
}

/// A package directory is any directory holding at least one ebuild
pub fn is_pkg_dir(path: &Path) -> bool {
    let Ok(entries) = path.read_dir() else {
        return false;
    };
    entries
        .filter_map(Result::ok)
        .any(|entry| is_ebuild(&entry.path()))
}
