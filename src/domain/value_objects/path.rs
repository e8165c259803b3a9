//! Path helpers shared by the page engine
//!
//! All resolution here is lexical: no symlinks are followed and the
//! filesystem is never consulted.

use std::path::{Component, Path, PathBuf};

/// Extension of page modules and of resolved local imports
pub const MODULE_EXTENSION: &str = "js";

/// Conventionally named modules that override the document shell and page wrapper
pub const SHELL_MODULES: [&str; 2] = ["_document.js", "_app.js"];

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root (or above the start of a relative path).
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Whether `path` looks like a page module (`*.js`)
pub fn is_module_file(path: &Path) -> bool {
    path.extension().map(|e| e == MODULE_EXTENSION).unwrap_or(false)
}

/// Whether `path` is `_document.js` or `_app.js` directly under `pages_root`
pub fn is_shell_module(pages_root: &Path, path: &Path) -> bool {
    path.parent() == Some(pages_root)
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| SHELL_MODULES.contains(&n))
            .unwrap_or(false)
}
