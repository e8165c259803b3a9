use std::path::{Path, PathBuf};

use dhow::config::CONFIG_FILE;

/// Discover the project root directory from an invocation directory.
///
/// Heuristics (first match wins, walking upward from `start`):
/// - `dhow.toml`
/// - `package.json` (the site's node project, where its JSX runtime lives)
/// - `.git/` or `.git` file (git repo root / worktree)
///
/// Falls back to `start` when no markers are found.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    for marker in [CONFIG_FILE, "package.json", ".git"] {
        if let Some(dir) = start.ancestors().find(|dir| dir.join(marker).exists()) {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}
